//! Error types for Roulette
//!
//! Provides a unified error type for server, store, and client operations.

use thiserror::Error;

/// Result type alias using RouletteError
pub type Result<T> = std::result::Result<T, RouletteError>;

/// Unified error type for Roulette operations
#[derive(Debug, Error)]
pub enum RouletteError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The peer closed the stream while a line was still expected
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Empty store: there is no student to pick")]
    EmptyStore,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// A reply line could not be decoded into the expected structured shape
    #[error("Decoding error: {0}")]
    Decoding(#[from] serde_json::Error),

    /// A reply line was well-formed text but not what the protocol requires
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("LOAD failed on the server")]
    LoadFailed,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RouletteError {
    /// True when the error only means the peer went away
    pub fn is_disconnect(&self) -> bool {
        match self {
            RouletteError::ConnectionClosed(_) => true,
            RouletteError::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ),
            _ => false,
        }
    }
}
