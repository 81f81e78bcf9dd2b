//! UseCase layer: the chat workflows, independent of the transport.

pub mod broadcaster;
pub mod context;
pub mod error;
pub mod handshake;
pub mod line_source;
pub mod session;

pub use broadcaster::{Broadcaster, EventSender};
pub use context::ServerContext;
pub use error::{DispatchError, HandshakeError};
pub use handshake::NameHandshake;
pub use line_source::LineSource;
pub use session::{ChatSessionUseCase, SessionOutcome};
