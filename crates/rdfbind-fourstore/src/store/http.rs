use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use oxigraph::{
    io::RdfFormat,
    model::{Graph, NamedNode},
};
use rdfbind_datasource::{BindingSet, rdf};
use reqwest::{Client, Response, header};

use super::{Store, TupleCursor};
use crate::{
    config::FourStoreConfig,
    error::{FourStoreError, Result},
    sparql::{parse_ask_json, parse_select_json},
};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// 4store client speaking the httpd protocol
pub struct HttpStore {
    client: Client,
    config: FourStoreConfig,
    connected: AtomicBool,
}

impl HttpStore {
    pub fn new(config: FourStoreConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            // Default request timeout (overridden per-request for updates)
            .timeout(config.query_timeout())
            .build()?;

        Ok(Self {
            client,
            config,
            connected: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &FourStoreConfig {
        &self.config
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(FourStoreError::NotConnected)
        }
    }

    async fn sparql(&self, query: &str, accept: &str) -> Result<Response> {
        self.ensure_connected()?;

        let response = self
            .client
            .post(self.config.sparql_endpoint())
            .header(header::ACCEPT, accept)
            .form(&[("query", query)])
            .send()
            .await?;

        check_status(response).await
    }
}

/// Turn a non-success response into [`FourStoreError::Backend`], keeping the body.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(FourStoreError::Backend { status, message })
}

/// Media type 4store expects for an upload in `format`.
fn upload_media_type(format: RdfFormat) -> &'static str {
    match format {
        RdfFormat::Turtle => "application/x-turtle",
        other => other.media_type(),
    }
}

/// RDF format of a CONSTRUCT response body.
fn response_format(content_type: Option<&str>) -> RdfFormat {
    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    match media_type {
        "text/plain" => RdfFormat::NTriples,
        "application/x-turtle" => RdfFormat::Turtle,
        other => RdfFormat::from_media_type(other).unwrap_or(RdfFormat::Turtle),
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn connect(&self) -> Result<()> {
        let url = self.config.status_endpoint();

        let response = self
            .client
            .get(&url)
            .timeout(self.config.connect_timeout())
            .send()
            .await
            .map_err(|e| FourStoreError::Connection {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FourStoreError::Connection {
                url,
                reason: format!("status endpoint returned {}", response.status()),
            });
        }

        self.connected.store(true, Ordering::SeqCst);
        tracing::info!(url = %self.config.url, "Connected to 4store");
        Ok(())
    }

    async fn disconnect(&self) -> Result<()> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Err(FourStoreError::NotConnected);
        }
        tracing::info!(url = %self.config.url, "Disconnected from 4store");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn query(&self, query: &str) -> Result<Box<dyn TupleCursor>> {
        let body = self.sparql(query, SPARQL_RESULTS_JSON).await?.text().await?;
        let (names, rows) = parse_select_json(&body)?;

        tracing::debug!(rows = rows.len(), "SELECT returned");
        Ok(Box::new(BufferedCursor {
            names,
            rows: rows.into_iter(),
            closed: false,
        }))
    }

    async fn construct_query(&self, query: &str) -> Result<Graph> {
        let response = self.sparql(query, "text/turtle").await?;
        let format = response_format(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let body = response.text().await?;

        rdf::parse_graph(body.as_bytes(), format).map_err(|e| FourStoreError::ParseError {
            reason: e.to_string(),
        })
    }

    async fn ask(&self, query: &str) -> Result<bool> {
        let body = self.sparql(query, SPARQL_RESULTS_JSON).await?.text().await?;
        parse_ask_json(&body)
    }

    async fn append(&self, data: &str, format: RdfFormat, graph: &NamedNode) -> Result<()> {
        self.ensure_connected()?;

        let response = self
            .client
            .post(self.config.data_endpoint())
            .timeout(self.config.update_timeout())
            .form(&[
                ("graph", graph.as_str()),
                ("data", data),
                ("mime-type", upload_media_type(format)),
            ])
            .send()
            .await?;

        check_status(response).await?;
        tracing::debug!(graph = %graph, bytes = data.len(), "Appended to graph");
        Ok(())
    }

    async fn add(&self, data: &str, format: RdfFormat, graph: &NamedNode) -> Result<()> {
        self.ensure_connected()?;

        let response = self
            .client
            .put(self.config.graph_endpoint(graph.as_str())?)
            .timeout(self.config.update_timeout())
            .header(header::CONTENT_TYPE, upload_media_type(format))
            .body(data.to_string())
            .send()
            .await?;

        check_status(response).await?;
        tracing::debug!(graph = %graph, bytes = data.len(), "Wrote graph");
        Ok(())
    }

    async fn delete(&self, graph: &NamedNode) -> Result<()> {
        self.ensure_connected()?;

        let response = self
            .client
            .delete(self.config.graph_endpoint(graph.as_str())?)
            .timeout(self.config.update_timeout())
            .send()
            .await?;

        check_status(response).await?;
        tracing::debug!(graph = %graph, "Deleted graph");
        Ok(())
    }
}

/// SELECT rows read in full from the response body
struct BufferedCursor {
    names: Vec<String>,
    rows: std::vec::IntoIter<BindingSet>,
    closed: bool,
}

impl Iterator for BufferedCursor {
    type Item = BindingSet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.rows.next()
    }
}

impl TupleCursor for BufferedCursor {
    fn binding_names(&self) -> &[String] {
        &self.names
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.rows = Vec::new().into_iter();
        Ok(())
    }
}
