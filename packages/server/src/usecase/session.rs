//! UseCase: 1 接続分のチャットセッション
//!
//! ## 流れ
//!
//! 1. 座席の予約（満員なら拒否して終了）
//! 2. バナー送信と名前のハンドシェイク
//! 3. 参加イベント → 1 行ごとにチャットイベント
//! 4. 切断時に登録解除して退出イベント
//!
//! 送信はすべてクライアントの送信キュー（`PusherChannel`）経由で行う。

use std::sync::Arc;

use crate::domain::{ChatEvent, ClientHandle, ClientId, MessageFormatter, PusherChannel, UserName};

use super::{
    context::ServerContext, error::HandshakeError, handshake::NameHandshake,
    line_source::LineSource,
};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Room was full; the client never saw the name prompt
    RoomFull,
    /// Client disconnected before registering a name
    Abandoned,
    /// Client joined as `name` and has since left
    Left(UserName),
}

/// Runs one connection from admission to leave
pub struct ChatSessionUseCase {
    context: Arc<ServerContext>,
    handshake: NameHandshake,
}

impl ChatSessionUseCase {
    pub fn new(context: Arc<ServerContext>) -> Self {
        let handshake = NameHandshake::new(context.registry.clone());
        Self { context, handshake }
    }

    /// Drive one session to completion.
    ///
    /// `lines` yields the client's input and `sink` is its outbound queue.
    /// Transport errors only end this session.
    pub async fn execute(&self, lines: &mut dyn LineSource, sink: PusherChannel) -> SessionOutcome {
        let registry = &self.context.registry;

        if !registry.try_reserve_slot().await {
            tracing::info!("Room is full, rejecting connection");
            if let Err(e) = sink.send(MessageFormatter::room_full(registry.capacity())) {
                tracing::debug!("Failed to send room-full notice: {}", e);
            }
            return SessionOutcome::RoomFull;
        }

        let handle = ClientHandle::new(ClientId::generate(), sink);
        if handle.sink.send(MessageFormatter::welcome()).is_err() {
            registry.release_slot().await;
            return SessionOutcome::Abandoned;
        }

        let name = match self.handshake.negotiate(lines, &handle).await {
            Ok(name) => name,
            Err(e) => {
                match e {
                    HandshakeError::Disconnected => {
                        tracing::debug!("Client {} left during the handshake", handle.id)
                    }
                    HandshakeError::Io(e) => {
                        tracing::warn!("Handshake of client {} failed: {}", handle.id, e)
                    }
                }
                registry.release_slot().await;
                return SessionOutcome::Abandoned;
            }
        };
        tracing::info!("Client {} registered as '{}'", handle.id, name);
        let names = registry.names().await;
        tracing::debug!("Registered clients: {:?}", names);

        self.chat_loop(lines, &name, handle).await;

        SessionOutcome::Left(name)
    }

    async fn chat_loop(&self, lines: &mut dyn LineSource, name: &UserName, handle: ClientHandle) {
        let id = handle.id;
        let joined = self
            .context
            .events
            .join(ChatEvent::join(name.clone(), id, self.context.now()), handle.sink);

        if let Err(e) = joined {
            tracing::warn!("Could not announce '{}': {}", name, e);
        } else {
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!("Connection of '{}' failed: {}", name, e);
                        break;
                    }
                };
                tracing::debug!("'{}' says {:?}", name, line);
                let event = ChatEvent::chat(name.clone(), id, line.into(), self.context.now());
                if let Err(e) = self.context.events.chat(event) {
                    tracing::warn!("Dropping chat line of '{}': {}", name, e);
                    break;
                }
            }
        }

        self.context.registry.unregister(name).await;
        let left = ChatEvent::leave(name.clone(), id, self.context.now());
        if let Err(e) = self.context.events.leave(left) {
            tracing::warn!("Could not announce departure of '{}': {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::{
        domain::{ClientRegistry, HistoryLog},
        infrastructure::registry::InMemoryClientRegistry,
        usecase::Broadcaster,
    };
    use chrono::NaiveDate;
    use tcpchat_shared::time::FixedClock;
    use tokio::sync::mpsc;

    struct ScriptedLines(VecDeque<String>);

    #[async_trait::async_trait]
    impl LineSource for ScriptedLines {
        async fn next_line(&mut self) -> std::io::Result<Option<String>> {
            Ok(self.0.pop_front())
        }
    }

    fn scripted(lines: &[&str]) -> ScriptedLines {
        ScriptedLines(lines.iter().map(|l| l.to_string()).collect())
    }

    fn setup(
        capacity: usize,
    ) -> (
        Arc<InMemoryClientRegistry>,
        Arc<ServerContext>,
        ChatSessionUseCase,
        Broadcaster,
    ) {
        let registry = Arc::new(InMemoryClientRegistry::new(capacity));
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        let (context, broadcaster) =
            ServerContext::new(registry.clone(), HistoryLog::new(), Arc::new(clock));
        let session = ChatSessionUseCase::new(context.clone());
        (registry, context, session, broadcaster)
    }

    #[tokio::test]
    async fn test_session_rejected_when_room_is_full() {
        // テスト項目: 満員の場合、満員メッセージのみ送られて名前入力に進まない
        // given (前提条件):
        let (registry, _context, session, _broadcaster) = setup(1);
        assert!(registry.try_reserve_slot().await);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut lines = scripted(&["alice"]);

        // when (操作):
        let outcome = session.execute(&mut lines, tx).await;

        // then (期待する結果):
        assert_eq!(outcome, SessionOutcome::RoomFull);
        assert_eq!(
            rx.recv().await,
            Some("Number of user is 1, comeback later :)\n".to_string())
        );
        assert_eq!(rx.recv().await, None);
        assert_eq!(lines.0.len(), 1);
    }

    #[tokio::test]
    async fn test_session_rejected_when_room_is_full_and_client_already_gone() {
        // テスト項目: 満員で、かつ送信キューが既に閉じていても、セッションは満員として終了する
        // given (前提条件):
        let (registry, _context, session, _broadcaster) = setup(1);
        assert!(registry.try_reserve_slot().await);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut lines = scripted(&["alice"]);

        // when (操作):
        let outcome = session.execute(&mut lines, tx).await;

        // then (期待する結果):
        assert_eq!(outcome, SessionOutcome::RoomFull);
        assert_eq!(registry.occupancy().await, 1);
    }

    #[tokio::test]
    async fn test_session_abandoned_before_name_releases_seat() {
        // テスト項目: 名前を決めずに切断した場合、予約した座席が返却される
        // given (前提条件):
        let (registry, _context, session, _broadcaster) = setup(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut lines = scripted(&[]);

        // when (操作):
        let outcome = session.execute(&mut lines, tx).await;

        // then (期待する結果):
        assert_eq!(outcome, SessionOutcome::Abandoned);
        assert_eq!(registry.occupancy().await, 0);
        assert!(rx.recv().await.unwrap().ends_with("[ENTER YOUR NAME]: "));
    }

    #[tokio::test]
    async fn test_session_traffic_reaches_other_clients_in_order() {
        // テスト項目: 参加・チャット・退出が他の参加者に順番通りに届き、終了後は登録解除される
        // given (前提条件):
        let (registry, context, session, broadcaster) = setup(10);
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        let bob_id = ClientId::generate();
        let bob = registry
            .register("bob".to_string(), ClientHandle::new(bob_id, bob_tx.clone()))
            .await
            .unwrap();
        context
            .events
            .join(ChatEvent::join(bob, bob_id, context.now()), bob_tx.clone())
            .unwrap();
        drop(context);
        let broadcaster_task = tokio::spawn(broadcaster.run());
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut lines = scripted(&["alice", "hello", "bye"]);

        // when (操作):
        let outcome = session.execute(&mut lines, tx).await;
        drop(session);
        broadcaster_task.await.unwrap();

        // then (期待する結果):
        let alice = UserName::try_from("alice").unwrap();
        assert_eq!(outcome, SessionOutcome::Left(alice.clone()));
        assert_eq!(registry.occupancy().await, 0);
        assert!(registry.lookup(&alice).await.is_none());

        let received: Vec<String> = std::iter::from_fn(|| bob_rx.try_recv().ok()).collect();
        assert_eq!(
            received,
            vec![
                "[01-01-2023 08:00:00][bob]:",
                "\nalice has joined our chat...\n[01-01-2023 08:00:00][bob]:",
                "\n[01-01-2023 08:00:00][alice]: hello\n[01-01-2023 08:00:00][bob]:",
                "\n[01-01-2023 08:00:00][alice]: bye\n[01-01-2023 08:00:00][bob]:",
                "\nalice has left our chat...\n[01-01-2023 08:00:00][bob]:",
            ]
        );
    }
}
