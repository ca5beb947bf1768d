//! Capability interface over the interactive host.
//!
//! The persistence core never talks to a terminal directly; it is handed a
//! [`Host`] that can pick a single file and show a message. Tests substitute
//! an in-memory fake.

use std::path::PathBuf;

use anyhow::Result;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

/// What the surrounding host must provide: a single-file chooser and an error
/// display.
pub trait Host {
    /// Ask the user for one file. `None` means the chooser was cancelled.
    fn pick_file(&mut self) -> Result<Option<PathBuf>>;

    /// Surface a blocking error message to the user.
    fn show_error(&mut self, message: &str);
}

/// Terminal implementation: a line prompt standing in for the editor's file
/// dialog. Empty input or Ctrl-C/Ctrl-D cancels.
pub struct TerminalHost {
    prompt: String,
}

impl TerminalHost {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Host for TerminalHost {
    fn pick_file(&mut self) -> Result<Option<PathBuf>> {
        let mut editor = Reedline::create();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(self.prompt.clone()),
            DefaultPromptSegment::Empty,
        );

        match editor.read_line(&prompt)? {
            Signal::Success(line) => {
                let line = line.trim();
                if line.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(PathBuf::from(line)))
                }
            }
            Signal::CtrlC | Signal::CtrlD => Ok(None),
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}
