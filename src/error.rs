//! Error types for Bookfinder
//!
//! Every I/O failure is caught by the controller that issued the request;
//! these types only travel as far as that controller.

use thiserror::Error;

/// Main error type for Bookfinder operations
#[derive(Error, Debug)]
pub enum BookFinderError {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),
}

/// Result type alias for Bookfinder operations
pub type Result<T> = std::result::Result<T, BookFinderError>;

/// Coarse classification used for logging and status lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NetworkFailure,
    MalformedResponse,
    Other,
}

impl BookFinderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookFinderError::Network(e) if e.is_decode() => ErrorKind::MalformedResponse,
            BookFinderError::Network(_) | BookFinderError::Status { .. } => {
                ErrorKind::NetworkFailure
            }
            BookFinderError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            _ => ErrorKind::Other,
        }
    }
}

impl From<serde_json::Error> for BookFinderError {
    fn from(e: serde_json::Error) -> Self {
        BookFinderError::MalformedResponse(e.to_string())
    }
}

impl From<toml::de::Error> for BookFinderError {
    fn from(e: toml::de::Error) -> Self {
        BookFinderError::Config(e.to_string())
    }
}
