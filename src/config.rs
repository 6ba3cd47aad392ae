//! Configuration for dictclient
//!
//! Centralized connection settings with sensible defaults.

use std::time::Duration;

use crate::error::{DictError, Result};

/// Well-known DICT port (RFC 2229)
pub const DEFAULT_PORT: u16 = 2628;

/// Connection configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Address
    // -------------------------------------------------------------------------
    /// Host name or IP address of the DICT server
    pub host: String,

    /// TCP port of the DICT server
    pub port: u16,

    // -------------------------------------------------------------------------
    // Timeouts (0 disables)
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds)
    pub connect_timeout_ms: u64,

    /// Socket read timeout (milliseconds)
    pub read_timeout_ms: u64,

    /// Socket write timeout (milliseconds)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Block Decoding
    // -------------------------------------------------------------------------
    /// Undo the leading-period doubling inside text blocks.
    /// When false, block lines are kept exactly as sent.
    pub unescape_dot_stuffing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "dict.org".to_string(),
            port: DEFAULT_PORT,
            connect_timeout_ms: 10_000,
            read_timeout_ms: 30_000,
            write_timeout_ms: 10_000,
            unescape_dot_stuffing: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// `host:port` form used for address resolution
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject settings that can never produce a connection
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(DictError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(DictError::Config("port must not be 0".to_string()));
        }
        Ok(())
    }

    pub(crate) fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub(crate) fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub(crate) fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Choose whether `..` at the start of a block line is unescaped
    pub fn unescape_dot_stuffing(mut self, enabled: bool) -> Self {
        self.config.unescape_dot_stuffing = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
