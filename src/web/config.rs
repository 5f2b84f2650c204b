//! Listener settings for the panel's HTTP server.

use crate::error::{PanelError, Result};
use std::net::SocketAddr;

/// Where the panel listens and which extras the router mounts.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub host: String,
    /// Defaults to [`crate::DEFAULT_WEB_PORT`]
    pub port: u16,
    /// Permissive CORS, for dashboards served from another origin
    pub enable_cors: bool,
    /// Directory mounted at `/static` when it exists
    pub static_path: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_WEB_PORT,
            enable_cors: false,
            static_path: None,
        }
    }
}

impl WebConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    pub fn with_cors(mut self, enable_cors: bool) -> Self {
        self.enable_cors = enable_cors;
        self
    }

    pub fn with_static_path(mut self, path: Option<String>) -> Self {
        self.static_path = path;
        self
    }

    /// `host:port` as given on the command line.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed listen address; hostnames are rejected.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address().parse().map_err(|e| {
            PanelError::config_error(format!("Invalid bind address {}: {}", self.bind_address(), e))
        })
    }
}
