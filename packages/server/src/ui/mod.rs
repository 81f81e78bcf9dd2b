//! TCP transport: accept loop, per-connection I/O and shutdown handling.

mod connection;
mod error;
mod line_reader;
mod server;
mod signal;

pub use connection::handle_connection;
pub use error::ServerError;
pub use line_reader::LineReader;
pub use server::Server;
