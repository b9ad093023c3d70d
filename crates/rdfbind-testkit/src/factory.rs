use std::path::Path;

use oxigraph::model::Graph;
use rdfbind_datasource::{DataSource, DataSourceConfig, DataSourceFactory, Result, rdf};

use crate::TestDataSource;

/// Config key listing the RDF files to load, comma separated
pub const FILES_KEY: &str = "files";

/// Creates [`TestDataSource`]s seeded from RDF files.
///
/// The `files` entry is split on commas and each path is trimmed. Every
/// file is parsed into a single graph in the order given; the serialization
/// is picked from the file extension, falling back to Turtle.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestDataSourceFactory;

impl TestDataSourceFactory {
    pub const ALIAS: &'static str = "test";

    /// Like [`DataSourceFactory::create`], without erasing the type.
    pub fn create_test_data_source(&self, config: &DataSourceConfig) -> Result<TestDataSource> {
        TestDataSource::new(load_files(config)?)
    }
}

fn load_files(config: &DataSourceConfig) -> Result<Graph> {
    let mut graph = Graph::new();
    let Some(files) = config.get_str(FILES_KEY) else {
        return Ok(graph);
    };

    for file in files.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        rdf::read_graph_file(&mut graph, Path::new(file))?;
    }

    Ok(graph)
}

impl DataSourceFactory for TestDataSourceFactory {
    fn alias(&self) -> &'static str {
        Self::ALIAS
    }

    fn can_create(&self, _config: &DataSourceConfig) -> bool {
        true
    }

    fn create(&self, config: &DataSourceConfig) -> Result<Box<dyn DataSource>> {
        Ok(Box::new(self.create_test_data_source(config)?))
    }
}
