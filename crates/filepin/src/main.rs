use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use filepin::app::commands::{ChangeOutcome, SelectionService};
use filepin::infra::config::Config;
use filepin::infra::workspace::resolve_root;
use filepin::ui::host::TerminalHost;
use filepin::ui::status::StatusLine;

#[derive(Parser)]
#[command(author, version, about = "Pin one file per workspace and expose it to tooling", long_about = None)]
struct Cli {
    /// Workspace root to operate on, instead of discovering one.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pinned file's resolved absolute path
    Get,
    /// Print the pinned file's base name
    Basename,
    /// Print the pinned file's base name without its extension
    Stem,
    /// Print the pinned file's extension, including the leading dot
    Ext,
    /// Print the base name of the pinned file's parent directory
    Dirname,
    /// Print the full path of the pinned file's parent directory
    Dirpath,
    /// Choose a file interactively and pin it
    Pin,
    /// Pin the given file
    Set {
        path: PathBuf,
    },
    /// Remove the pinned selection
    Clear,
    /// Show the status line
    Status,
    /// Generate shell completion scripts
    Completions {
        shell: Shell,
    },
}

fn main() -> Result<ExitCode> {
    filepin::init();

    let cli = Cli::parse();
    let root = resolve_root(cli.root)?;
    let config = Config::load(root.as_deref())?;
    let service = SelectionService::new(root, &config);
    let status = StatusLine::new();

    match cli.command {
        Commands::Get => println!("{}", service.resolved_path()),
        Commands::Basename => println!("{}", service.basename()),
        Commands::Stem => println!("{}", service.stem()),
        Commands::Ext => println!("{}", service.extension()),
        Commands::Dirname => println!("{}", service.dirname()),
        Commands::Dirpath => println!("{}", service.dirpath()),
        Commands::Pin => {
            let mut host = TerminalHost::new(config.picker.prompt());
            match service.change(&mut host)? {
                ChangeOutcome::Saved(_) => println!("{}", status.render(&service)),
                ChangeOutcome::Cancelled => {}
                ChangeOutcome::NoWorkspace => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::Set { path } => {
            service.set(&path)?;
            println!("{}", status.render(&service));
        }
        Commands::Clear => {
            service.clear()?;
        }
        Commands::Status => println!("{}", status.render(&service)),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}
