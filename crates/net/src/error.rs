//! Network error types

use std::io;
use std::time::Duration;

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Request exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server unavailable: connection refused")]
    Refused,
}
