use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use oxigraph::{
    model::{Graph, GraphNameRef, NamedNode, Triple},
    sparql::{QueryResults, SparqlEvaluator},
    store::Store,
};
use rdfbind_datasource::{
    BindingSet, BindingValue, DataSource, DataSourceError, MutableDataSource, QueryError,
    Result, ResultSet, SupportsNamedGraphs,
};

/// In-memory data source for tests
///
/// Holds the graph it was created with in the default graph of an embedded
/// oxigraph store. Unlike remote backends it supports every mutation,
/// including removing individual triples from a named graph.
pub struct TestDataSource {
    store: Store,
    connected: AtomicBool,
}

impl TestDataSource {
    pub fn new(graph: Graph) -> Result<Self> {
        let store = Store::new().map_err(DataSourceError::backend)?;
        for triple in &graph {
            store
                .insert(triple.in_graph(GraphNameRef::DefaultGraph))
                .map_err(DataSourceError::backend)?;
        }

        tracing::debug!(triples = graph.len(), "Created in-memory test data source");

        Ok(Self {
            store,
            connected: AtomicBool::new(false),
        })
    }

    /// Snapshot of the default graph
    pub fn graph(&self) -> Result<Graph> {
        self.graph_named(GraphNameRef::DefaultGraph)
    }

    /// Snapshot of the named graph `graph_uri`
    pub fn named_graph(&self, graph_uri: &NamedNode) -> Result<Graph> {
        self.graph_named(GraphNameRef::NamedNode(graph_uri.as_ref()))
    }

    fn graph_named(&self, graph_name: GraphNameRef<'_>) -> Result<Graph> {
        let mut graph = Graph::new();
        for quad in self
            .store
            .quads_for_pattern(None, None, None, Some(graph_name))
        {
            let quad = quad.map_err(DataSourceError::backend)?;
            graph.insert(&Triple::from(quad));
        }
        Ok(graph)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(DataSourceError::NotConnected)
        }
    }

    fn insert_into(&self, graph_name: GraphNameRef<'_>, graph: &Graph) -> Result<()> {
        self.ensure_connected()?;
        for triple in graph {
            self.store
                .insert(triple.in_graph(graph_name))
                .map_err(DataSourceError::backend)?;
        }
        Ok(())
    }

    fn remove_from(&self, graph_name: GraphNameRef<'_>, graph: &Graph) -> Result<()> {
        self.ensure_connected()?;
        for triple in graph {
            self.store
                .remove(triple.in_graph(graph_name))
                .map_err(DataSourceError::backend)?;
        }
        Ok(())
    }

    /// Evaluate `query` on a blocking thread.
    async fn evaluate(&self, query: &str) -> std::result::Result<QueryOutput, QueryError> {
        if !self.is_connected() {
            return Err(QueryError::NotConnected);
        }

        let prepared =
            SparqlEvaluator::new()
                .parse_query(query)
                .map_err(|e| QueryError::InvalidQuery {
                    reason: e.to_string(),
                })?;

        let store = self.store.clone();
        tokio::task::spawn_blocking(move || {
            let results = prepared
                .on_store(&store)
                .execute()
                .map_err(QueryError::evaluation)?;
            QueryOutput::collect(results)
        })
        .await
        .map_err(QueryError::evaluation)?
    }
}

/// Fully materialized query results
enum QueryOutput {
    Solutions(Vec<String>, Vec<BindingSet>),
    Boolean(bool),
    Graph(Graph),
}

impl QueryOutput {
    fn collect(results: QueryResults) -> std::result::Result<Self, QueryError> {
        match results {
            QueryResults::Solutions(solutions) => {
                let names = solutions
                    .variables()
                    .iter()
                    .map(|v| v.as_str().to_string())
                    .collect();
                let mut rows = Vec::new();
                for solution in solutions {
                    let solution = solution.map_err(QueryError::evaluation)?;
                    rows.push(
                        solution
                            .iter()
                            .map(|(var, term)| (var.as_str(), BindingValue::from(term)))
                            .collect(),
                    );
                }
                Ok(Self::Solutions(names, rows))
            }
            QueryResults::Boolean(value) => Ok(Self::Boolean(value)),
            QueryResults::Graph(triples) => {
                let mut graph = Graph::new();
                for triple in triples {
                    graph.insert(&triple.map_err(QueryError::evaluation)?);
                }
                Ok(Self::Graph(graph))
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Solutions(..) => "solutions",
            Self::Boolean(_) => "boolean",
            Self::Graph(_) => "graph",
        }
    }
}

fn unexpected(expected: &str, output: &QueryOutput) -> QueryError {
    QueryError::InvalidQuery {
        reason: format!("expected {expected} results, query returned {}", output.kind()),
    }
}

#[async_trait]
impl DataSource for TestDataSource {
    fn name(&self) -> &'static str {
        "test"
    }

    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        if !self.connected.swap(false, Ordering::SeqCst) {
            tracing::warn!("Disconnecting test data source that was not connected");
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn select_query(&self, query: &str) -> std::result::Result<ResultSet, QueryError> {
        match self.evaluate(query).await? {
            QueryOutput::Solutions(names, rows) => Ok(ResultSet::from_rows(names, rows)),
            other => Err(unexpected("solutions", &other)),
        }
    }

    async fn graph_query(&self, query: &str) -> std::result::Result<Graph, QueryError> {
        match self.evaluate(query).await? {
            QueryOutput::Graph(graph) => Ok(graph),
            other => Err(unexpected("graph", &other)),
        }
    }

    async fn ask(&self, query: &str) -> std::result::Result<bool, QueryError> {
        match self.evaluate(query).await? {
            QueryOutput::Boolean(value) => Ok(value),
            other => Err(unexpected("boolean", &other)),
        }
    }

    async fn describe(&self, uri: &NamedNode) -> Result<Graph> {
        Ok(self.graph_query(&format!("DESCRIBE <{}>", uri.as_str())).await?)
    }

    fn as_mutable(&self) -> Option<&dyn MutableDataSource> {
        Some(self)
    }

    fn as_named_graphs(&self) -> Option<&dyn SupportsNamedGraphs> {
        Some(self)
    }
}

#[async_trait]
impl MutableDataSource for TestDataSource {
    async fn add(&self, graph: &Graph) -> Result<()> {
        self.insert_into(GraphNameRef::DefaultGraph, graph)
    }

    async fn remove(&self, graph: &Graph) -> Result<()> {
        self.remove_from(GraphNameRef::DefaultGraph, graph)
    }
}

#[async_trait]
impl SupportsNamedGraphs for TestDataSource {
    async fn add_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()> {
        self.insert_into(GraphNameRef::NamedNode(graph_uri.as_ref()), graph)
    }

    async fn remove_named_graph(&self, graph_uri: &NamedNode) -> Result<()> {
        self.ensure_connected()?;
        self.store
            .remove_named_graph(graph_uri.as_ref())
            .map_err(DataSourceError::backend)?;
        Ok(())
    }

    async fn remove_from_named_graph(&self, graph_uri: &NamedNode, graph: &Graph) -> Result<()> {
        self.remove_from(GraphNameRef::NamedNode(graph_uri.as_ref()), graph)
    }
}
