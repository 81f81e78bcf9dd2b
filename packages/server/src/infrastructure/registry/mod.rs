//! ClientRegistry の実装
//!
//! - `inmemory`: HashMap を使ったプロセス内実装

pub mod inmemory;

pub use inmemory::InMemoryClientRegistry;
