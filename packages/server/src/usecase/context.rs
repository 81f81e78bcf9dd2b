//! Process-wide state shared by every session.

use std::sync::Arc;

use tcpchat_shared::time::Clock;

use crate::domain::{ClientRegistry, HistoryLog, Timestamp};

use super::broadcaster::{Broadcaster, EventSender};

/// Everything a session needs, passed explicitly instead of living in globals.
///
/// The history log is handed to the Broadcaster at construction and owned by
/// it from then on.
pub struct ServerContext {
    pub registry: Arc<dyn ClientRegistry>,
    pub events: EventSender,
    pub clock: Arc<dyn Clock>,
}

impl ServerContext {
    /// Build the context and the Broadcaster that serves it.
    ///
    /// The caller must spawn [`Broadcaster::run`].
    pub fn new(
        registry: Arc<dyn ClientRegistry>,
        history: HistoryLog,
        clock: Arc<dyn Clock>,
    ) -> (Arc<Self>, Broadcaster) {
        let (events, broadcaster) = Broadcaster::channel(history);
        let context = Arc::new(Self {
            registry,
            events,
            clock,
        });
        (context, broadcaster)
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now())
    }
}
