//! Errors that stop the server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Listening socket could not be opened
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
