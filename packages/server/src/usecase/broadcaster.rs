//! UseCase: イベントのブロードキャスト
//!
//! 全セッションから届くチャット／参加／退出イベントを、到着順に 1 件ずつ直列に処理し、
//! 参加済みの全クライアントへ配信します。
//!
//! ## 設計ノート
//!
//! - 配信先テーブルと履歴はこのタスクだけが所有する（ロック不要）
//! - 全イベントは 1 本のキューを通るため、処理順は到着順と一致する
//! - 参加イベントは参加者の送信キューを運ぶため、Registry を参照しない
//! - 新規参加者への履歴再生と本人のプロンプトは同じ送信キューに順に積むため、
//!   プロンプトが履歴より先に表示されることはない

use tokio::sync::mpsc;

use crate::domain::{
    ChatEvent, ClientId, EventKind, HistoryLog, HistoryRecord, MessageFormatter, PusherChannel,
    UserName,
};

use super::error::DispatchError;

/// Item of the Broadcaster's event queue
enum Inbound {
    Join {
        event: ChatEvent,
        sink: PusherChannel,
    },
    Chat(ChatEvent),
    Leave(ChatEvent),
}

/// Producer side of the Broadcaster's event queue
#[derive(Clone)]
pub struct EventSender {
    events: mpsc::UnboundedSender<Inbound>,
}

impl EventSender {
    /// Announce a newly registered client; `sink` becomes its fan-out target
    pub fn join(&self, event: ChatEvent, sink: PusherChannel) -> Result<(), DispatchError> {
        debug_assert_eq!(event.kind, EventKind::Join);
        self.send(Inbound::Join { event, sink })
    }

    pub fn chat(&self, event: ChatEvent) -> Result<(), DispatchError> {
        debug_assert_eq!(event.kind, EventKind::Chat);
        self.send(Inbound::Chat(event))
    }

    /// Must be sent after the client has been unregistered
    pub fn leave(&self, event: ChatEvent) -> Result<(), DispatchError> {
        debug_assert_eq!(event.kind, EventKind::Leave);
        self.send(Inbound::Leave(event))
    }

    fn send(&self, inbound: Inbound) -> Result<(), DispatchError> {
        self.events
            .send(inbound)
            .map_err(|_| DispatchError::BroadcasterStopped)
    }
}

/// A client that has joined the room and receives traffic
struct Subscriber {
    id: ClientId,
    name: UserName,
    sink: PusherChannel,
}

/// Singleton dispatcher serializing fan-out to every joined client
pub struct Broadcaster {
    history: HistoryLog,
    subscribers: Vec<Subscriber>,
    events: mpsc::UnboundedReceiver<Inbound>,
}

impl Broadcaster {
    /// Create the Broadcaster together with the sender sessions use to reach it
    pub fn channel(history: HistoryLog) -> (EventSender, Self) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let sender = EventSender { events: events_tx };
        let broadcaster = Self {
            history,
            subscribers: Vec::new(),
            events: events_rx,
        };

        (sender, broadcaster)
    }

    /// Consume events in arrival order until every [`EventSender`] has been dropped
    pub async fn run(mut self) {
        tracing::debug!("Broadcaster started");
        while let Some(inbound) = self.events.recv().await {
            self.dispatch(inbound);
        }
        tracing::debug!("Broadcaster stopped");
    }

    /// Process every event already queued without waiting for more.
    ///
    /// Returns the number of events processed.
    #[cfg(test)]
    fn dispatch_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(inbound) = self.events.try_recv() {
            self.dispatch(inbound);
            processed += 1;
        }
        processed
    }

    #[cfg(test)]
    fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Names of joined clients in join order
    #[cfg(test)]
    fn subscriber_names(&self) -> Vec<UserName> {
        self.subscribers.iter().map(|s| s.name.clone()).collect()
    }

    fn dispatch(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Join { event, sink } => self.on_join(event, sink),
            Inbound::Chat(event) => self.on_chat(event),
            Inbound::Leave(event) => self.on_leave(event),
        }
    }

    fn on_join(&mut self, event: ChatEvent, sink: PusherChannel) {
        let replay: String = self.history.replay().collect();
        if !replay.is_empty() {
            push(&event.sender, &sink, replay);
        }

        self.subscribers.push(Subscriber {
            id: event.origin,
            name: event.sender.clone(),
            sink,
        });
        tracing::info!(
            "'{}' joined the chat ({} in room)",
            event.sender,
            self.subscribers.len()
        );

        for subscriber in &self.subscribers {
            if subscriber.id == event.origin {
                push(
                    &subscriber.name,
                    &subscriber.sink,
                    MessageFormatter::prompt(&event.timestamp, &event.sender),
                );
            } else if !event.sender.is_empty() {
                push(
                    &subscriber.name,
                    &subscriber.sink,
                    MessageFormatter::joined(&event.sender)
                        + &MessageFormatter::prompt(&event.timestamp, &subscriber.name),
                );
            }
        }
    }

    fn on_chat(&mut self, event: ChatEvent) {
        let displayable = event.text.is_displayable();
        if displayable {
            self.history.append(HistoryRecord::from(&event));
        } else {
            tracing::debug!("Dropping undisplayable text from '{}'", event.sender);
        }

        for subscriber in &self.subscribers {
            if subscriber.id == event.origin {
                push(
                    &subscriber.name,
                    &subscriber.sink,
                    MessageFormatter::prompt(&event.timestamp, &event.sender),
                );
            } else if displayable {
                push(
                    &subscriber.name,
                    &subscriber.sink,
                    MessageFormatter::chat_line(&event.timestamp, &event.sender, &event.text)
                        + &MessageFormatter::prompt(&event.timestamp, &subscriber.name),
                );
            }
        }
    }

    fn on_leave(&mut self, event: ChatEvent) {
        self.subscribers.retain(|s| s.id != event.origin);
        tracing::info!(
            "'{}' left the chat ({} in room)",
            event.sender,
            self.subscribers.len()
        );

        if event.sender.is_empty() {
            return;
        }
        for subscriber in &self.subscribers {
            push(
                &subscriber.name,
                &subscriber.sink,
                MessageFormatter::left(&event.sender)
                    + &MessageFormatter::prompt(&event.timestamp, &subscriber.name),
            );
        }
    }
}

/// A closed sink only means that client is going away; its session cleans up.
fn push(recipient: &UserName, sink: &PusherChannel, content: String) {
    if let Err(e) = sink.send(content) {
        tracing::warn!("Failed to push message to '{}': {}", recipient, e);
    }
}
