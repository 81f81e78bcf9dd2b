//! Conversation history replayed to newly joined clients.

use std::collections::VecDeque;

use super::{entity::HistoryRecord, formatter::MessageFormatter};

/// Append-only log of chat records in dispatch order.
///
/// Unbounded unless a limit is given; with a limit the oldest records are
/// evicted first.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: VecDeque<HistoryRecord>,
    limit: Option<usize>,
}

impl HistoryLog {
    /// Create an unbounded history log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history log that keeps only the newest `limit` records
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    pub fn append(&mut self, record: HistoryRecord) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.records.len() >= limit {
                self.records.pop_front();
            }
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    /// Rendered lines, oldest first
    pub fn replay(&self) -> impl Iterator<Item = String> + '_ {
        self.records.iter().map(MessageFormatter::history_line)
    }
}
