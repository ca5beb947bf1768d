//! Status line component.

use crate::app::commands::SelectionService;

/// The three states the indicator can be in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusState {
    NoWorkspace,
    NoSelection,
    Selected {
        /// The selected file's base name.
        label: String,
        /// The full resolved path.
        tooltip: String,
    },
}

/// Single persistent indicator showing the pinned file.
///
/// The state is recomputed from a fresh load on every render, so the line
/// always reflects what is on disk.
#[derive(Debug, Default)]
pub struct StatusLine;

impl StatusLine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, service: &SelectionService) -> StatusState {
        if service.workspace_root().is_none() {
            return StatusState::NoWorkspace;
        }
        match service.current() {
            Some(selection) => StatusState::Selected {
                label: selection.file_name(),
                tooltip: selection.path().display().to_string(),
            },
            None => StatusState::NoSelection,
        }
    }

    pub fn render(&self, service: &SelectionService) -> String {
        match self.compute(service) {
            StatusState::NoWorkspace => "No workspace opened".to_owned(),
            StatusState::NoSelection => "No file selected".to_owned(),
            StatusState::Selected { label, tooltip } => {
                format!("{label} (Selected file: {tooltip})")
            }
        }
    }
}
