use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used to keep the backend's original failure as the cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while evaluating a query
#[derive(Error, Debug)]
pub enum QueryError {
    /// The backend failed to evaluate the query
    #[error("Query evaluation failed: {0}")]
    Evaluation(#[source] BoxError),

    /// The query could not be parsed
    #[error("Invalid SPARQL query: {reason}")]
    InvalidQuery { reason: String },

    /// The data source is not connected
    #[error("Data source is not connected")]
    NotConnected,
}

impl QueryError {
    /// Wrap a backend error, keeping it as the cause.
    pub fn evaluation(error: impl Into<BoxError>) -> Self {
        Self::Evaluation(error.into())
    }
}

/// Data source errors
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// Connecting to the backend failed
    #[error("Failed to connect to data source: {0}")]
    Connect(#[source] BoxError),

    /// The backend rejected or failed an operation
    #[error("Data source operation failed: {0}")]
    Backend(#[source] BoxError),

    /// The backend cannot perform this operation at all
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A query issued on behalf of the operation failed
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Reading an RDF file failed
    #[error("Failed to read RDF file {}: {source}", path.display())]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// RDF could not be parsed or serialized
    #[error("RDF error: {reason}")]
    Rdf { reason: String },

    /// The factory configuration is unusable
    #[error("Invalid data source configuration: {0}")]
    InvalidConfig(String),

    /// No factory is registered under the requested alias
    #[error("No data source factory registered for '{0}'")]
    UnknownFactory(String),

    /// The data source is not connected
    #[error("Data source is not connected")]
    NotConnected,
}

impl DataSourceError {
    /// Wrap a backend error, keeping it as the cause.
    pub fn backend(error: impl Into<BoxError>) -> Self {
        Self::Backend(error.into())
    }

    pub fn connect(error: impl Into<BoxError>) -> Self {
        Self::Connect(error.into())
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, DataSourceError>;
