//! Server execution logic.

use std::{future::Future, sync::Arc};

use tcpchat_shared::time::{Clock, SystemClock};
use tokio::net::TcpListener;

use crate::{
    config::ServerConfig,
    domain::HistoryLog,
    infrastructure::registry::InMemoryClientRegistry,
    usecase::{ChatSessionUseCase, ServerContext},
};

use super::{connection::handle_connection, error::ServerError, signal::shutdown_signal};

/// TCP chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    clock: Arc<dyn Clock>,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock used to timestamp events
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Bind the configured address and serve until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the listening socket cannot be opened.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("TCP chat server listening on {}", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Accept connections on `listener` until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let registry = Arc::new(InMemoryClientRegistry::new(self.config.max_clients));
        let history = match self.config.history_limit {
            Some(limit) => HistoryLog::with_limit(limit),
            None => HistoryLog::new(),
        };
        let (context, broadcaster) = ServerContext::new(registry, history, self.clock);
        tokio::spawn(broadcaster.run());
        let session = Arc::new(ChatSessionUseCase::new(context));

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::info!("Accepted connection from {}", peer);
                        tokio::spawn(handle_connection(stream, peer, session.clone()));
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
            }
        }

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
