//! Domain-specific errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no workspace is open; open a folder or pass --root")]
    NoWorkspace,
}
