//! Input port: a lazy sequence of text lines from one client.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// One line per logical message; `Ok(None)` once the client disconnects.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}
