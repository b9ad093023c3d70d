use thiserror::Error;

/// 4store client errors
#[derive(Error, Debug)]
pub enum FourStoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 4store returned an error response
    #[error("4store error (status {status}): {message}")]
    Backend { status: u16, message: String },

    /// The configured base URL cannot address a graph
    #[error("Invalid 4store URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The store could not be reached on connect
    #[error("Failed to connect to 4store at {url}: {reason}")]
    Connection { url: String, reason: String },

    /// Operation attempted before `connect`
    #[error("Not connected to 4store")]
    NotConnected,

    /// Failed to parse response
    #[error("Failed to parse response: {reason}")]
    ParseError { reason: String },

    /// Query cursor could not be closed
    #[error("Failed to close query cursor: {reason}")]
    CursorClose { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, FourStoreError>;
