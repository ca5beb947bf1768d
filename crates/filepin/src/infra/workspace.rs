//! Workspace root discovery.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Resolve the workspace root for this invocation.
///
/// Precedence: an explicit `--root` value, then the `FILEPIN_WORKSPACE`
/// environment variable, then a marker walk-up from the current directory.
/// `None` means no workspace is open.
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<Option<PathBuf>> {
    if let Some(root) = explicit {
        return Ok(Some(root));
    }
    if let Ok(root) = env::var("FILEPIN_WORKSPACE") {
        return Ok(Some(PathBuf::from(root)));
    }
    let cwd = env::current_dir()?;
    Ok(find_workspace_root(&cwd))
}

/// Walk up from `start` looking for a directory that carries a workspace
/// marker (`.git` or `.vscode`).
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() || current.join(".vscode").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}
