//! Reading and writing RDF graphs.

use std::{fs::File, io::BufReader, io::Read, path::Path};

use oxigraph::{
    io::{RdfFormat, RdfParser, RdfSerializer},
    model::{Graph, Triple},
};

use crate::error::{DataSourceError, Result};

/// Serialize `graph` to text in `format`.
pub fn serialize_graph(graph: &Graph, format: RdfFormat) -> Result<String> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(Vec::new());
    for triple in graph {
        serializer
            .serialize_triple(triple)
            .map_err(|e| DataSourceError::Rdf {
                reason: format!("Failed to serialize triple: {e}"),
            })?;
    }
    let bytes = serializer.finish().map_err(|e| DataSourceError::Rdf {
        reason: format!("Failed to finish serialization: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| DataSourceError::Rdf {
        reason: format!("Serialized graph is not valid UTF-8: {e}"),
    })
}

/// Parse RDF from `reader` into a graph.
///
/// Quads are flattened into triples; the graph name is dropped.
pub fn parse_graph(reader: impl Read, format: RdfFormat) -> Result<Graph> {
    let mut graph = Graph::new();
    extend_graph(&mut graph, reader, format)?;
    Ok(graph)
}

/// Parse RDF from `reader` and add its triples to `graph`.
pub fn extend_graph(graph: &mut Graph, reader: impl Read, format: RdfFormat) -> Result<usize> {
    let mut added = 0;
    for parsed in RdfParser::from_format(format).for_reader(reader) {
        let quad = parsed.map_err(|e| DataSourceError::Rdf {
            reason: format!("Failed to parse {}: {e}", format.name()),
        })?;
        if graph.insert(&Triple::from(quad)) {
            added += 1;
        }
    }
    Ok(added)
}

/// Guess the RDF format of `path` from its extension, defaulting to Turtle.
pub fn format_for_path(path: &Path) -> RdfFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RdfFormat::from_extension)
        .unwrap_or(RdfFormat::Turtle)
}

/// Read the RDF file at `path` and add its triples to `graph`.
pub fn read_graph_file(graph: &mut Graph, path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|source| DataSourceError::Fixture {
        path: path.to_path_buf(),
        source,
    })?;
    let format = format_for_path(path);
    let added = extend_graph(graph, BufReader::new(file), format).map_err(|e| match e {
        DataSourceError::Rdf { reason } => DataSourceError::Rdf {
            reason: format!("{}: {reason}", path.display()),
        },
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        triples = added,
        "Loaded RDF file"
    );
    Ok(added)
}
