//! Server configuration.

use thiserror::Error;

use crate::infrastructure::registry::inmemory::DEFAULT_CAPACITY;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8989;
/// Ports below this are reserved for system services
pub const MIN_PORT: u16 = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "port {0} is a system port; choose a port between {min} and 65535",
        min = MIN_PORT
    )]
    PortOutOfRange(u16),

    #[error("the chat needs room for at least one client")]
    ZeroCapacity,
}

/// Runtime settings of the chat server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Ceiling on simultaneous connections
    pub max_clients: usize,
    /// Keep only this many history records; `None` keeps everything
    pub history_limit: Option<usize>,
}

impl ServerConfig {
    /// Build a validated configuration
    pub fn new(
        host: String,
        port: u16,
        max_clients: usize,
        history_limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            host,
            port,
            max_clients,
            history_limit,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port < MIN_PORT {
            return Err(ConfigError::PortOutOfRange(self.port));
        }
        if self.max_clients == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_clients: DEFAULT_CAPACITY,
            history_limit: None,
        }
    }
}
