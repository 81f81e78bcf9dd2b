//! Per-connection I/O.

use std::{net::SocketAddr, sync::Arc};

use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    sync::mpsc,
};

use crate::usecase::ChatSessionUseCase;

use super::line_reader::LineReader;

/// Serve one accepted connection until the client leaves.
///
/// Output is written by a dedicated task draining the client's outbound
/// queue, so the Broadcaster never waits on a slow socket. The connection is
/// closed once every holder of that queue has let go of it.
pub async fn handle_connection<S>(stream: S, peer: SocketAddr, session: Arc<ChatSessionUseCase>)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (reader, writer) = tokio::io::split(stream);
    let (tx, rx) = mpsc::unbounded_channel();
    let writer_task = tokio::spawn(write_outbound(writer, rx, peer));

    let mut lines = LineReader::new(reader);
    let outcome = session.execute(&mut lines, tx).await;
    tracing::info!("Session of {} ended: {:?}", peer, outcome);

    if let Err(e) = writer_task.await {
        tracing::error!("Writer task of {} failed: {}", peer, e);
    }
}

async fn write_outbound<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>, peer: SocketAddr)
where
    W: AsyncWrite + Unpin,
{
    while let Some(chunk) = rx.recv().await {
        if let Err(e) = writer.write_all(chunk.as_bytes()).await {
            tracing::debug!("Write to {} failed: {}", peer, e);
            return;
        }
        if let Err(e) = writer.flush().await {
            tracing::debug!("Flush to {} failed: {}", peer, e);
            return;
        }
    }
    let _ = writer.shutdown().await;
}
