//! Durable storage of the pinned file path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::model::{Selection, resolve, to_portable};
use crate::infra::config::Store as StoreSettings;

/// Maps a workspace root to its one pinned file, serialized portably as a
/// single-key JSON document under the workspace's settings directory.
///
/// Reads are best-effort and never fail: a missing, unreadable, or malformed
/// settings file is the same as "nothing pinned". Writes propagate their
/// errors to the caller.
#[derive(Debug, Clone)]
pub struct PathStore {
    root: PathBuf,
    path: PathBuf,
    field: String,
}

impl PathStore {
    /// Create a store rooted at the given workspace directory.
    pub fn new(root: impl Into<PathBuf>, settings: &StoreSettings) -> Self {
        let root = root.into();
        let path = root.join(settings.dir()).join(settings.file_name());
        Self {
            root,
            path,
            field: settings.field(),
        }
    }

    /// Location of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the pinned selection, expanding the workspace token against the
    /// current root. Returns `None` when nothing usable is on disk.
    pub fn load(&self) -> Option<Selection> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "settings file unreadable");
                return None;
            }
        };

        let document: Value = match serde_json::from_str(&data) {
            Ok(document) => document,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "settings file is not valid JSON");
                return None;
            }
        };

        let stored = document.get(&self.field).and_then(Value::as_str)?;
        Some(Selection::new(resolve(&self.root, stored)))
    }

    /// Persist the given absolute path, replacing any previous record.
    ///
    /// Paths under the workspace root are stored in portable token form. The
    /// settings directory is created if missing, and the document is written
    /// through a temp file in the same directory so a failed write never
    /// leaves a torn record behind.
    pub fn save(&self, absolute: &Path) -> Result<()> {
        let dir = self.path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create settings directory {}", dir.display()))?;

        let mut document = Map::new();
        document.insert(
            self.field.clone(),
            Value::String(to_portable(&self.root, absolute)),
        );
        let data = serde_json::to_string_pretty(&Value::Object(document))
            .context("failed to serialize settings")?;

        let temp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to stage settings file in {}", dir.display()))?;
        fs::write(temp.path(), data)
            .with_context(|| format!("failed to write settings file to {}", self.path.display()))?;
        temp.persist(&self.path)
            .with_context(|| format!("failed to replace settings file {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the persisted selection. Removing an absent record is a no-op;
    /// returns whether a record existed.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| {
                format!("failed to remove settings file {}", self.path.display())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(root: &Path) -> PathStore {
        PathStore::new(root, &StoreSettings::default())
    }

    #[test]
    fn settings_path_is_deterministic() {
        let store = store_in(Path::new("/ws"));
        assert_eq!(store.path(), Path::new("/ws/.vscode/fileSelector.json"));
    }

    #[test]
    fn load_without_a_file_is_none() {
        let temp = tempfile::tempdir().unwrap();
        assert!(store_in(temp.path()).load().is_none());
    }

    #[test]
    fn load_swallows_invalid_json() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(temp.path().join(".vscode")).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn load_swallows_a_missing_field() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        fs::create_dir_all(temp.path().join(".vscode")).unwrap();
        fs::write(store.path(), r#"{ "unrelated": true }"#).unwrap();

        assert!(store.load().is_none());
    }

    #[test]
    fn save_tolerates_an_existing_settings_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join(".vscode")).unwrap();

        let store = store_in(temp.path());
        store.save(&temp.path().join("a.txt")).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn saves_the_portable_token_form_on_disk() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        store.save(&temp.path().join("src/lib.rs")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"selectedFile\": \"${workspaceFolder}/src/lib.rs\""));
    }

    #[test]
    fn round_trips_a_path_under_the_root() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());
        let target = temp.path().join("src/foo.bar");

        store.save(&target).unwrap();
        let selection = store.load().unwrap();
        assert_eq!(selection.path(), target);
    }

    #[test]
    fn stores_outside_paths_verbatim() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());

        store.save(Path::new("/somewhere/else.txt")).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"/somewhere/else.txt\""));
        assert!(!raw.contains("${workspaceFolder}"));

        let selection = store.load().unwrap();
        assert_eq!(selection.path(), Path::new("/somewhere/else.txt"));
    }

    #[test]
    fn second_save_overwrites_the_first() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());

        store.save(&temp.path().join("first.txt")).unwrap();
        store.save(&temp.path().join("second.txt")).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(!raw.contains("first.txt"));
        assert_eq!(
            store.load().unwrap().path(),
            temp.path().join("second.txt")
        );
    }

    #[test]
    fn clear_removes_the_record() {
        let temp = tempfile::tempdir().unwrap();
        let store = store_in(temp.path());

        assert!(!store.clear().unwrap());
        store.save(&temp.path().join("a.txt")).unwrap();
        assert!(store.clear().unwrap());
        assert!(store.load().is_none());
    }
}
