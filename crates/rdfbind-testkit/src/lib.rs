//! In-memory data source for exercising code written against
//! [`rdfbind_datasource::DataSource`] without a running triple store.

mod data_source;
mod factory;

pub use data_source::TestDataSource;
pub use factory::{FILES_KEY, TestDataSourceFactory};

#[cfg(test)]
mod tests;
