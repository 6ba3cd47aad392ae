//! Error types for dictclient
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using DictError
pub type Result<T> = std::result::Result<T, DictError>;

/// Unified error type for dictclient operations
#[derive(Debug, Error)]
pub enum DictError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection lost: server closed the stream mid-reply")]
    ConnectionLost,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {}", describe_protocol(.code, .detail))]
    Protocol {
        /// Server status code, when the failing line carried one
        code: Option<u16>,
        detail: String,
    },

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("Connection is closed")]
    Closed,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_protocol(code: &Option<u16>, detail: &str) -> String {
    match code {
        Some(code) => format!("{}: {}", code, detail),
        None => detail.to_string(),
    }
}

impl DictError {
    /// Protocol error without a server status code (malformed line)
    pub fn malformed(detail: impl Into<String>) -> Self {
        DictError::Protocol {
            code: None,
            detail: detail.into(),
        }
    }

    /// Protocol error carrying the server's code and detail text
    pub fn status(code: u16, detail: impl Into<String>) -> Self {
        DictError::Protocol {
            code: Some(code),
            detail: detail.into(),
        }
    }

    /// Server status code attached to this error, if any
    pub fn code(&self) -> Option<u16> {
        match self {
            DictError::Protocol { code, .. } => *code,
            _ => None,
        }
    }

    /// Whether the connection that produced this error must be abandoned.
    ///
    /// Transport failures and protocol errors without a status code leave
    /// the reply stream out of sync. A coded protocol error (a negative
    /// reply the caller asked to surface) does not.
    pub fn is_fatal(&self) -> bool {
        match self {
            DictError::Io(_) | DictError::ConnectionLost => true,
            DictError::Protocol { code, .. } => code.is_none(),
            DictError::Closed | DictError::InvalidArgument(_) | DictError::Config(_) => false,
        }
    }
}
