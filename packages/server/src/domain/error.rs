//! Domain error types.

use thiserror::Error;

/// Errors raised while constructing value objects
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Name contains characters outside `[A-Za-z0-9_-]`
    #[error("user name '{0}' contains characters outside [A-Za-z0-9_-]")]
    InvalidUserName(String),
}

/// Errors returned by [`ClientRegistry::register`](super::ClientRegistry::register)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Name fails the charset check
    #[error("user name '{0}' is invalid")]
    NameInvalid(String),

    /// Another registered client already uses the name
    #[error("user name '{0}' is already taken")]
    NameTaken(String),
}

impl From<ValueObjectError> for RegistryError {
    fn from(err: ValueObjectError) -> Self {
        match err {
            ValueObjectError::InvalidUserName(name) => RegistryError::NameInvalid(name),
        }
    }
}
