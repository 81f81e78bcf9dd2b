//! Entities of the chat domain.

use tokio::sync::mpsc;

use super::value_object::{ClientId, MessageText, Timestamp, UserName};

/// Outbound queue of one client; everything written to the client goes through it
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Connection handle stored in the registry
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub id: ClientId,
    pub sink: PusherChannel,
}

impl ClientHandle {
    pub fn new(id: ClientId, sink: PusherChannel) -> Self {
        Self { id, sink }
    }
}

/// Kind of a [`ChatEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Chat,
    Join,
    Leave,
}

/// Something a session tells the Broadcaster about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub kind: EventKind,
    pub timestamp: Timestamp,
    pub sender: UserName,
    pub origin: ClientId,
    pub text: MessageText,
}

impl ChatEvent {
    pub fn chat(
        sender: UserName,
        origin: ClientId,
        text: MessageText,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            kind: EventKind::Chat,
            timestamp,
            sender,
            origin,
            text,
        }
    }

    pub fn join(sender: UserName, origin: ClientId, timestamp: Timestamp) -> Self {
        Self {
            kind: EventKind::Join,
            timestamp,
            sender,
            origin,
            text: MessageText::from(""),
        }
    }

    pub fn leave(sender: UserName, origin: ClientId, timestamp: Timestamp) -> Self {
        Self {
            kind: EventKind::Leave,
            timestamp,
            sender,
            origin,
            text: MessageText::from(""),
        }
    }
}

/// One entry of the conversation history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub timestamp: Timestamp,
    pub sender: UserName,
    pub text: MessageText,
}

impl From<&ChatEvent> for HistoryRecord {
    fn from(event: &ChatEvent) -> Self {
        Self {
            timestamp: event.timestamp,
            sender: event.sender.clone(),
            text: event.text.clone(),
        }
    }
}
