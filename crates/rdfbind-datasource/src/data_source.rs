use async_trait::async_trait;
use oxigraph::model::{Graph, NamedNode};

use crate::{
    error::{QueryError, Result},
    result_set::ResultSet,
};

/// Read access to a triple store
///
/// Implementations forward SPARQL to a specific backend and translate its
/// failures into [`QueryError`] / [`crate::DataSourceError`].
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Data source name for logging/debugging
    fn name(&self) -> &'static str;

    async fn connect(&self) -> Result<()>;

    /// Disconnect from the backend.
    ///
    /// Best-effort: failures are logged, never returned.
    async fn disconnect(&self);

    fn is_connected(&self) -> bool;

    /// Execute a SPARQL SELECT query
    async fn select_query(&self, query: &str) -> std::result::Result<ResultSet, QueryError>;

    /// Execute a SPARQL CONSTRUCT query
    async fn graph_query(&self, query: &str) -> std::result::Result<Graph, QueryError>;

    /// Execute a SPARQL ASK query
    async fn ask(&self, query: &str) -> std::result::Result<bool, QueryError>;

    /// Return the triples describing `uri`
    async fn describe(&self, uri: &NamedNode) -> Result<Graph>;

    fn as_mutable(&self) -> Option<&dyn MutableDataSource> {
        None
    }

    fn as_named_graphs(&self) -> Option<&dyn SupportsNamedGraphs> {
        None
    }
}

/// A data source that accepts triples outside of any named graph
#[async_trait]
pub trait MutableDataSource: DataSource {
    async fn add(&self, graph: &Graph) -> Result<()>;

    async fn remove(&self, graph: &Graph) -> Result<()>;
}

/// A data source whose unit of mutation is a named graph
#[async_trait]
pub trait SupportsNamedGraphs: MutableDataSource {
    /// Add `graph` to the named graph `graph_uri`, creating it when needed
    async fn add_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()>;

    /// Remove the named graph `graph_uri` entirely
    async fn remove_named_graph(&self, graph_uri: &NamedNode) -> Result<()>;

    /// Remove `graph` from the named graph `graph_uri`
    async fn remove_from_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()>;
}
