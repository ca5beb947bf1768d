//! Infrastructure adapters for configuration and workspace discovery.

pub mod config;
pub mod workspace;
