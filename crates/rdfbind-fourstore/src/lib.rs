mod config;
pub mod error;
mod factory;
mod query;
mod sparql;
mod store;

use async_trait::async_trait;
pub use config::FourStoreConfig;
use error::FourStoreError;
pub use factory::FourStoreDataSourceFactory;
use oxigraph::{
    io::RdfFormat,
    model::{Graph, NamedNode},
};
pub use query::{GRAPH_NOT_FOUND_MARKER, describe_query};
use rdfbind_datasource::{
    BoxError, DataSource, DataSourceError, MutableDataSource, QueryError, Result, ResultSet,
    RowCursor, SupportsNamedGraphs, rdf,
};
pub use store::{HttpStore, Store, TupleCursor};
use tracing::{Instrument, Span};

#[cfg(test)]
mod tests;

/// Data source backed by a 4store instance
///
/// 4store can only mutate named graphs, so ungraphed `add`/`remove` are
/// rejected and removing triples from a named graph drops the whole graph.
pub struct FourStoreDataSource {
    store: Box<dyn Store>,
    span: Span,
}

impl FourStoreDataSource {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self::with_span(store, tracing::info_span!("fourstore"))
    }

    /// Create a data source whose diagnostics are reported inside `span`.
    pub fn with_span(store: Box<dyn Store>, span: Span) -> Self {
        Self { store, span }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Serialize `graph` and append it to `graph_uri`, creating the graph
    /// when 4store reports it missing.
    async fn append_or_create(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()> {
        let data = rdf::serialize_graph(graph, RdfFormat::Turtle)?;

        let append_error = match self.store.append(&data, RdfFormat::Turtle, graph_uri).await {
            Ok(()) => return Ok(()),
            Err(error) => error,
        };

        // Matched on the message: any failure quoting the 404 page counts as a missing graph
        if !append_error.to_string().contains(GRAPH_NOT_FOUND_MARKER) {
            return Err(data_source_error(append_error));
        }

        tracing::debug!(graph = %graph_uri, "Graph does not exist yet, creating it");
        match self.store.add(&data, RdfFormat::Turtle, graph_uri).await {
            Ok(()) => Ok(()),
            Err(create_error) => {
                tracing::warn!(
                    graph = %graph_uri,
                    error = %create_error,
                    "Creating graph after failed append also failed"
                );
                Err(data_source_error(append_error))
            }
        }
    }
}

fn query_error(error: FourStoreError) -> QueryError {
    match error {
        FourStoreError::NotConnected => QueryError::NotConnected,
        other => QueryError::evaluation(other),
    }
}

fn data_source_error(error: FourStoreError) -> DataSourceError {
    match error {
        FourStoreError::NotConnected => DataSourceError::NotConnected,
        other => DataSourceError::backend(other),
    }
}

/// Adapts the store's cursor to the data source result contract
struct StoreCursor(Box<dyn TupleCursor>);

impl RowCursor for StoreCursor {
    fn binding_names(&self) -> &[String] {
        self.0.binding_names()
    }

    fn next_row(&mut self) -> Option<rdfbind_datasource::BindingSet> {
        self.0.next()
    }

    fn close(&mut self) -> std::result::Result<(), BoxError> {
        self.0.close().map_err(BoxError::from)
    }
}

#[async_trait]
impl DataSource for FourStoreDataSource {
    fn name(&self) -> &'static str {
        "4store"
    }

    async fn connect(&self) -> Result<()> {
        self.store
            .connect()
            .instrument(self.span.clone())
            .await
            .map_err(DataSourceError::connect)
    }

    async fn disconnect(&self) {
        if let Err(error) = self.store.disconnect().instrument(self.span.clone()).await {
            tracing::warn!(
                parent: &self.span,
                error = %error,
                "Disconnecting from 4store failed"
            );
        }
    }

    fn is_connected(&self) -> bool {
        self.store.is_connected()
    }

    async fn select_query(&self, query: &str) -> std::result::Result<ResultSet, QueryError> {
        let cursor = self
            .store
            .query(query)
            .instrument(self.span.clone())
            .await
            .map_err(query_error)?;

        Ok(ResultSet::new(Box::new(StoreCursor(cursor))).in_span(self.span.clone()))
    }

    async fn graph_query(&self, query: &str) -> std::result::Result<Graph, QueryError> {
        self.store
            .construct_query(query)
            .instrument(self.span.clone())
            .await
            .map_err(query_error)
    }

    async fn ask(&self, query: &str) -> std::result::Result<bool, QueryError> {
        self.store
            .ask(query)
            .instrument(self.span.clone())
            .await
            .map_err(query_error)
    }

    async fn describe(&self, uri: &NamedNode) -> Result<Graph> {
        self.store
            .construct_query(&describe_query(uri))
            .instrument(self.span.clone())
            .await
            .map_err(data_source_error)
    }

    fn as_mutable(&self) -> Option<&dyn MutableDataSource> {
        Some(self)
    }

    fn as_named_graphs(&self) -> Option<&dyn SupportsNamedGraphs> {
        Some(self)
    }
}

#[async_trait]
impl MutableDataSource for FourStoreDataSource {
    async fn add(&self, _graph: &Graph) -> Result<()> {
        Err(DataSourceError::Unsupported(
            "Adding single triples, or graphs of triples is not supported, only adds to named graphs are supported"
                .to_string(),
        ))
    }

    async fn remove(&self, _graph: &Graph) -> Result<()> {
        Err(DataSourceError::Unsupported(
            "Removing single triples, or graphs of triples is not supported, only named graph removal is supported"
                .to_string(),
        ))
    }
}

#[async_trait]
impl SupportsNamedGraphs for FourStoreDataSource {
    async fn add_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()> {
        self.append_or_create(graph_uri, graph)
            .instrument(self.span.clone())
            .await
    }

    async fn remove_named_graph(&self, graph_uri: &NamedNode) -> Result<()> {
        self.store
            .delete(graph_uri)
            .instrument(self.span.clone())
            .await
            .map_err(data_source_error)
    }

    /// 4store deletes whole graphs only; `graph` is not consulted.
    async fn remove_from_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()> {
        if !graph.is_empty() {
            tracing::debug!(
                parent: &self.span,
                graph = %graph_uri,
                triples = graph.len(),
                "4store removes whole graphs; dropping the named graph"
            );
        }
        self.remove_named_graph(graph_uri).await
    }
}
