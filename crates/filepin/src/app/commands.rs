//! Command entry points over the path store.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::app::store::PathStore;
use crate::domain::errors::DomainError;
use crate::domain::model::Selection;
use crate::infra::config::{Config, Store as StoreSettings};
use crate::ui::host::Host;

/// Result of a change-selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// A file was chosen and persisted.
    Saved(Selection),
    /// The chooser was cancelled; nothing changed.
    Cancelled,
    /// No workspace is open; the error was shown through the host.
    NoWorkspace,
}

/// Implements the command surface: read the selection and its derived
/// fragments, change it, clear it.
///
/// Read paths never fail; with no workspace or no stored selection they yield
/// the unset result. Mutations require an open workspace.
#[derive(Debug, Clone)]
pub struct SelectionService {
    root: Option<PathBuf>,
    settings: StoreSettings,
}

impl SelectionService {
    pub fn new(root: Option<PathBuf>, config: &Config) -> Self {
        Self {
            root,
            settings: config.store.clone(),
        }
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// The store for the open workspace, when one is open.
    pub fn store(&self) -> Option<PathStore> {
        self.root
            .as_ref()
            .map(|root| PathStore::new(root, &self.settings))
    }

    /// Current selection, resolved against the workspace root.
    pub fn current(&self) -> Option<Selection> {
        self.store().and_then(|store| store.load())
    }

    /// Resolved absolute path of the selection, or empty when unset.
    pub fn resolved_path(&self) -> String {
        self.fragment(|selection| selection.path().display().to_string())
    }

    /// Base name of the selection, or empty when unset.
    pub fn basename(&self) -> String {
        self.fragment(Selection::file_name)
    }

    /// Base name without extension, or empty when unset.
    pub fn stem(&self) -> String {
        self.fragment(Selection::file_stem)
    }

    /// Extension with leading dot, or empty when unset or absent.
    pub fn extension(&self) -> String {
        self.fragment(Selection::extension)
    }

    /// Parent directory base name, or empty when unset.
    pub fn dirname(&self) -> String {
        self.fragment(Selection::parent_name)
    }

    /// Parent directory full path, or empty when unset.
    pub fn dirpath(&self) -> String {
        self.fragment(Selection::parent_path)
    }

    /// Persist the given file as the selection.
    pub fn set(&self, path: &Path) -> Result<Selection> {
        let store = self.store().ok_or(DomainError::NoWorkspace)?;
        let absolute = absolutize(path)?;
        store.save(&absolute)?;
        Ok(Selection::new(absolute))
    }

    /// Interactive change-selection: ask the host for a file and persist it.
    ///
    /// With no workspace open the error goes through the host and nothing is
    /// touched; a cancelled chooser likewise performs no state change.
    pub fn change(&self, host: &mut dyn Host) -> Result<ChangeOutcome> {
        if self.store().is_none() {
            host.show_error(&DomainError::NoWorkspace.to_string());
            return Ok(ChangeOutcome::NoWorkspace);
        }

        match host.pick_file()? {
            Some(path) => self.set(&path).map(ChangeOutcome::Saved),
            None => Ok(ChangeOutcome::Cancelled),
        }
    }

    /// Remove the persisted selection. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        let store = self.store().ok_or(DomainError::NoWorkspace)?;
        store.clear()
    }

    fn fragment(&self, read: impl Fn(&Selection) -> String) -> String {
        self.current()
            .map(|selection| read(&selection))
            .unwrap_or_default()
    }
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}
