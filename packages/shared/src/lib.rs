//! Utilities shared across the TCP chat workspace.

pub mod logger;
pub mod time;
