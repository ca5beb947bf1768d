//! Domain types: the pinned selection and portable path handling.

pub mod errors;
pub mod model;
