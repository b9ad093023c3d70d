mod http;

use async_trait::async_trait;
pub use http::HttpStore;
use oxigraph::{
    io::RdfFormat,
    model::{Graph, NamedNode},
};
use rdfbind_datasource::BindingSet;

use crate::error::Result;

/// Cursor over the rows of a SELECT query issued to the store
pub trait TupleCursor: Iterator<Item = BindingSet> + Send {
    fn binding_names(&self) -> &[String];

    fn close(&mut self) -> Result<()>;
}

/// Client for a 4store instance
///
/// 4store only mutates whole named graphs: data is appended to, written
/// into, or deleted from a graph identified by URI.
#[async_trait]
pub trait Store: Send + Sync {
    async fn connect(&self) -> Result<()>;

    async fn disconnect(&self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Execute a SPARQL SELECT query
    async fn query(&self, query: &str) -> Result<Box<dyn TupleCursor>>;

    /// Execute a SPARQL CONSTRUCT query
    async fn construct_query(&self, query: &str) -> Result<Graph>;

    /// Execute a SPARQL ASK query
    async fn ask(&self, query: &str) -> Result<bool>;

    /// Append `data` to an existing named graph
    async fn append(&self, data: &str, format: RdfFormat, graph: &NamedNode) -> Result<()>;

    /// Create (or replace) the named graph with `data`
    async fn add(&self, data: &str, format: RdfFormat, graph: &NamedNode) -> Result<()>;

    /// Delete the named graph
    async fn delete(&self, graph: &NamedNode) -> Result<()>;
}
