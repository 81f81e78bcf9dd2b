//! Infrastructure layer: concrete implementations of domain interfaces.

pub mod registry;
