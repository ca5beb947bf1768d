//! Domain models for the pinned file and its portable on-disk form.

use std::path::{Path, PathBuf};

/// Placeholder substituted for the workspace root in the persisted record, so
/// the settings file stays valid when the workspace is relocated.
pub const WORKSPACE_TOKEN: &str = "${workspaceFolder}";

/// The single file the tool currently tracks, resolved to an absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    path: PathBuf,
}

impl Selection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Full resolved path of the selected file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the selected file ("foo.bar").
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Base name without its extension ("foo").
    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including the leading dot (".bar"), or empty when there is
    /// none.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }

    /// Base name of the containing directory ("src").
    pub fn parent_name(&self) -> String {
        self.path
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Full path of the containing directory ("/ws/src").
    pub fn parent_path(&self) -> String {
        self.path
            .parent()
            .map(|parent| parent.display().to_string())
            .unwrap_or_default()
    }
}

/// Compute the portable form stored on disk.
///
/// Paths under the workspace root have the root replaced by
/// [`WORKSPACE_TOKEN`]; anything else is stored verbatim. Prefix matching is
/// component-wise, so a root of `/ws` never claims `/wsx/file`.
pub fn to_portable(root: &Path, absolute: &Path) -> String {
    match absolute.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => WORKSPACE_TOKEN.to_owned(),
        Ok(rel) => format!("{WORKSPACE_TOKEN}/{}", rel.display()),
        Err(_) => absolute.display().to_string(),
    }
}

/// Expand a stored value back against the current workspace root.
///
/// Only a leading token is substituted, and only its first occurrence; values
/// without the token pass through unchanged.
pub fn resolve(root: &Path, stored: &str) -> PathBuf {
    match stored.strip_prefix(WORKSPACE_TOKEN) {
        Some(rest) => {
            let rest = rest.trim_start_matches(['/', '\\']);
            if rest.is_empty() {
                root.to_path_buf()
            } else {
                root.join(rest)
            }
        }
        None => PathBuf::from(stored),
    }
}
