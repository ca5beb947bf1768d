//! Host-facing surfaces: the picker capability and the status line.

pub mod host;
pub mod status;
