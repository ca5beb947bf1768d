//! Application layer orchestrating domain logic and infrastructure.

pub mod commands;
pub mod store;
