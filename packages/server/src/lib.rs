//! Line-oriented multi-client TCP chat server.
//!
//! Clients connect with any line-based tool (`nc`, `telnet`), choose a unique
//! name, see the conversation so far and then chat with everyone else.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
