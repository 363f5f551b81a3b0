//! Endpoint configuration for the key-value backend

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tenax_core::ClientOptions;

/// Default server port
pub const DEFAULT_PORT: u16 = 6379;

/// Connection settings for one Redis endpoint
///
/// Immutable after the client is constructed. The connect/read/write
/// timeouts are enforced by the socket, not by the retry layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvConfig {
    /// Server hostname or address
    pub host: String,
    /// Server port
    pub port: u16,
    /// ACL username, when the server requires one
    pub username: Option<String>,
    /// Password, when the server requires one
    pub password: Option<String>,
    /// Logical database index selected after connecting
    pub db: i64,
    /// Timeout for establishing the TCP connection
    pub connect_timeout: Duration,
    /// Socket read timeout; `None` blocks indefinitely
    pub read_timeout: Option<Duration>,
    /// Socket write timeout; `None` blocks indefinitely
    pub write_timeout: Option<Duration>,
    /// Resilience knobs shared with the generic client
    pub options: ClientOptions,
}

impl Default for KvConfig {
    fn default() -> Self {
        KvConfig {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            username: None,
            password: None,
            db: 0,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Some(Duration::from_secs(5)),
            write_timeout: Some(Duration::from_secs(5)),
            options: ClientOptions::default(),
        }
    }
}

impl KvConfig {
    /// Endpoint at `host:port` with default timeouts
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        KvConfig {
            host: host.into(),
            port,
            ..KvConfig::default()
        }
    }

    /// Set credentials
    pub fn with_credentials(mut self, username: Option<String>, password: Option<String>) -> Self {
        self.username = username;
        self.password = password;
        self
    }

    /// Select a logical database index
    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Set the connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the socket read timeout
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set the socket write timeout
    pub fn with_write_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.write_timeout = timeout;
        self
    }

    /// Set the resilience options
    pub fn with_options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }
}
