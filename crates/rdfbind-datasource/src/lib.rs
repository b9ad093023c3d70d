//! Data source contract for RDF triple stores.
//!
//! Backends implement [`DataSource`] (and, when they accept writes,
//! [`MutableDataSource`] / [`SupportsNamedGraphs`]) and expose a
//! [`DataSourceFactory`] that a [`DataSourceRegistry`] resolves by alias.

mod data_source;
pub mod error;
mod factory;
pub mod rdf;
mod result_set;
pub mod types;

pub use data_source::{DataSource, MutableDataSource, SupportsNamedGraphs};
pub use error::{BoxError, DataSourceError, QueryError, Result};
pub use factory::{DataSourceConfig, DataSourceFactory, DataSourceRegistry};
pub use oxigraph::{
    io::RdfFormat,
    model::{Graph, NamedNode, Triple},
};
pub use result_set::{MemoryCursor, ResultSet, RowCursor};
pub use types::{BindingSet, BindingValue};
