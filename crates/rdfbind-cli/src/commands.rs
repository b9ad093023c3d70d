use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use rdfbind_datasource::{DataSource, Graph, NamedNode, RdfFormat, ResultSet, rdf};

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Run a SPARQL SELECT query and print rows as tab-separated values
    Select { query: String },
    /// Run a SPARQL CONSTRUCT query and print the graph as N-Triples
    Construct { query: String },
    /// Run a SPARQL ASK query and print `true` or `false`
    Ask { query: String },
    /// Print the triples whose subject is `uri`
    Describe { uri: String },
    /// Load an RDF file into a named graph
    Add { graph: String, file: PathBuf },
    /// Delete a named graph
    Remove { graph: String },
}

impl Command {
    pub(crate) async fn run(self, data_source: &dyn DataSource, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Select { query } => {
                let results = data_source.select_query(&query).await?;
                write_rows(results, out)?;
            }
            Self::Construct { query } => {
                let graph = data_source.graph_query(&query).await?;
                write_graph(&graph, out)?;
            }
            Self::Ask { query } => {
                writeln!(out, "{}", data_source.ask(&query).await?)?;
            }
            Self::Describe { uri } => {
                let graph = data_source.describe(&parse_uri(&uri)?).await?;
                write_graph(&graph, out)?;
            }
            Self::Add { graph, file } => {
                let graph_uri = parse_uri(&graph)?;
                let named_graphs = data_source.as_named_graphs().with_context(|| {
                    format!("{} data source does not support named graphs", data_source.name())
                })?;

                let mut triples = Graph::new();
                rdf::read_graph_file(&mut triples, &file)?;
                named_graphs.add_named_graph(&graph_uri, &triples).await?;

                tracing::info!(graph = %graph_uri, triples = triples.len(), "Added triples");
            }
            Self::Remove { graph } => {
                let graph_uri = parse_uri(&graph)?;
                let named_graphs = data_source.as_named_graphs().with_context(|| {
                    format!("{} data source does not support named graphs", data_source.name())
                })?;

                named_graphs.remove_named_graph(&graph_uri).await?;

                tracing::info!(graph = %graph_uri, "Removed graph");
            }
        }
        Ok(())
    }
}

fn parse_uri(uri: &str) -> Result<NamedNode> {
    NamedNode::new(uri).with_context(|| format!("Invalid URI: {uri}"))
}

/// Header of binding names, then one line per row. Unbound cells are empty.
fn write_rows(mut results: ResultSet, out: &mut impl Write) -> Result<()> {
    let names = results.binding_names().to_vec();
    writeln!(out, "{}", names.join("\t"))?;

    for row in results.by_ref() {
        let cells: Vec<String> = names
            .iter()
            .map(|name| row.get(name).map(ToString::to_string).unwrap_or_default())
            .collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }

    results.close();
    Ok(())
}

fn write_graph(graph: &Graph, out: &mut impl Write) -> Result<()> {
    out.write_all(rdf::serialize_graph(graph, RdfFormat::NTriples)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::{fs, io::Write};

    use rdfbind_datasource::{DataSourceConfig, DataSourceFactory};
    use rdfbind_testkit::{FILES_KEY, TestDataSourceFactory};

    use super::Command;

    const PEOPLE_TTL: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
<http://example.org/alice> foaf:name "Alice" ; foaf:knows <http://example.org/bob> .
<http://example.org/bob> foaf:name "Bob" .
"#;

    async fn run(command: Command, files: &str) -> anyhow::Result<String> {
        let data_source = TestDataSourceFactory
            .create(&DataSourceConfig::new().with(FILES_KEY, files))
            .unwrap();
        data_source.connect().await.unwrap();

        let mut out = Vec::new();
        command.run(data_source.as_ref(), &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn people_file() -> tempfile::TempPath {
        let mut file = tempfile::Builder::new().suffix(".ttl").tempfile().unwrap();
        file.write_all(PEOPLE_TTL.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[tokio::test]
    async fn select_prints_tab_separated_rows() {
        let file = people_file();
        let out = run(
            Command::Select {
                query: "SELECT ?s ?name WHERE { ?s <http://xmlns.com/foaf/0.1/name> ?name } ORDER BY ?name"
                    .to_string(),
            },
            &file.display().to_string(),
        )
        .await
        .unwrap();

        assert_eq!(
            out,
            "s\tname\n<http://example.org/alice>\t\"Alice\"\n<http://example.org/bob>\t\"Bob\"\n"
        );
    }

    #[tokio::test]
    async fn unbound_cells_are_empty() {
        let file = people_file();
        let out = run(
            Command::Select {
                query: "SELECT ?s ?friend WHERE { ?s <http://xmlns.com/foaf/0.1/name> ?n \
                        OPTIONAL { ?s <http://xmlns.com/foaf/0.1/knows> ?friend } } ORDER BY ?s"
                    .to_string(),
            },
            &file.display().to_string(),
        )
        .await
        .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "<http://example.org/alice>\t<http://example.org/bob>");
        assert_eq!(lines[2], "<http://example.org/bob>\t");
    }

    #[tokio::test]
    async fn describe_prints_ntriples() {
        let file = people_file();
        let out = run(
            Command::Describe {
                uri: "http://example.org/bob".to_string(),
            },
            &file.display().to_string(),
        )
        .await
        .unwrap();

        assert_eq!(
            out.trim(),
            "<http://example.org/bob> <http://xmlns.com/foaf/0.1/name> \"Bob\" ."
        );
    }

    #[tokio::test]
    async fn ask_prints_the_boolean() {
        let out = run(
            Command::Ask {
                query: "ASK { ?s ?p ?o }".to_string(),
            },
            "",
        )
        .await
        .unwrap();
        assert_eq!(out, "false\n");
    }

    #[tokio::test]
    async fn add_then_remove_named_graph() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("people.ttl");
        fs::write(&file, PEOPLE_TTL).unwrap();

        let data_source = TestDataSourceFactory.create(&DataSourceConfig::new()).unwrap();
        data_source.connect().await.unwrap();
        let mut out = Vec::new();

        Command::Add {
            graph: "http://example.org/people".to_string(),
            file,
        }
        .run(data_source.as_ref(), &mut out)
        .await
        .unwrap();
        let query = "ASK { GRAPH <http://example.org/people> { ?s ?p ?o } }";
        assert!(data_source.ask(query).await.unwrap());

        Command::Remove {
            graph: "http://example.org/people".to_string(),
        }
        .run(data_source.as_ref(), &mut out)
        .await
        .unwrap();
        assert!(!data_source.ask(query).await.unwrap());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn invalid_uri_is_reported() {
        let error = run(
            Command::Describe {
                uri: "not a uri".to_string(),
            },
            "",
        )
        .await
        .unwrap_err();
        assert!(error.to_string().contains("Invalid URI"));
    }
}
