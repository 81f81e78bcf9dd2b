//! Line-oriented TCP chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tcpchat-server
//! cargo run --bin tcpchat-server -- 2525 --max-clients 20 --history-limit 500
//! ```
//! and connect with `nc localhost 8989`.

use clap::Parser;
use tcpchat_server::{
    config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig},
    infrastructure::registry::inmemory::DEFAULT_CAPACITY,
    ui::Server,
};
use tcpchat_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tcpchat-server")]
#[command(about = "Line-oriented multi-client TCP chat server", long_about = None)]
struct Args {
    /// Port number to listen on (1024-65535)
    #[arg(default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1024..))]
    port: u16,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Maximum number of simultaneous clients
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    max_clients: usize,

    /// Keep only the newest N chat lines for replay (default: keep all)
    #[arg(long)]
    history_limit: Option<usize>,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = match ServerConfig::new(
        args.host,
        args.port,
        args.max_clients,
        args.history_limit,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = Server::new(config).run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
