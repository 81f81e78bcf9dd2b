//! Domain layer for the chat server.
//!
//! This module contains the chat vocabulary (names, events, history) and the
//! interfaces the outer layers implement. Nothing here touches a socket.

pub mod entity;
pub mod error;
pub mod formatter;
pub mod history;
pub mod registry;
pub mod value_object;

pub use entity::{ChatEvent, ClientHandle, EventKind, HistoryRecord, PusherChannel};
pub use error::{RegistryError, ValueObjectError};
pub use formatter::MessageFormatter;
pub use history::HistoryLog;
pub use registry::ClientRegistry;
pub use value_object::{ClientId, MessageText, Timestamp, UserName};

#[cfg(test)]
pub use registry::MockClientRegistry;
