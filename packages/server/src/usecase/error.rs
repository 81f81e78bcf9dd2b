//! UseCase layer error types.

use thiserror::Error;

/// Why a name negotiation ended without a registered name
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Client went away before choosing a usable name
    #[error("client disconnected during the name handshake")]
    Disconnected,

    /// Reading the candidate name failed
    #[error("failed to read user name: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to hand an event to the Broadcaster
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Broadcaster task has stopped
    #[error("broadcaster is no longer running")]
    BroadcasterStopped,
}
