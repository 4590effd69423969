//! Web server configuration.

use crate::error::{BotError, Result};
use crate::DEFAULT_WEB_ADDR;
use serde::{Deserialize, Serialize};

/// Configuration for the web server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Host to bind the server to
    pub host: String,
    /// Port to bind the server to
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

impl WebConfig {
    /// Create a new web configuration with custom host and port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse an `addr` flag of the form `host:port`. An empty host (e.g.
    /// `":8080"`) resolves to `localhost`.
    pub fn from_addr(addr: &str) -> Result<Self> {
        let addr = if addr.is_empty() { DEFAULT_WEB_ADDR } else { addr };
        let (host, port) = addr
            .rsplit_once(':')
            .ok_or_else(|| BotError::config(format!("invalid address (got={addr:?})")))?;
        let port = port
            .parse::<u16>()
            .map_err(|e| BotError::config(format!("invalid port in address {addr:?}: {e}")))?;
        let host = if host.is_empty() { "localhost" } else { host };
        Ok(Self::new(host, port))
    }

    /// Set the host for the web server.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port for the web server.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
