use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{FourStoreError, Result};

/// Configuration for a 4store HTTP endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FourStoreConfig {
    /// Base URL of the 4store httpd (e.g., "http://localhost:8000")
    pub url: String,

    /// Timeout for SELECT/CONSTRUCT/ASK requests in milliseconds
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Timeout for data append/create/delete requests in milliseconds
    #[serde(default = "default_update_timeout_ms")]
    pub update_timeout_ms: u64,

    /// Timeout for establishing a connection in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_query_timeout_ms() -> u64 {
    60_000
}

fn default_update_timeout_ms() -> u64 {
    300_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

impl FourStoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query_timeout_ms: default_query_timeout_ms(),
            update_timeout_ms: default_update_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn update_timeout(&self) -> Duration {
        Duration::from_millis(self.update_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    fn base(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// SPARQL query endpoint
    pub fn sparql_endpoint(&self) -> String {
        format!("{}/sparql/", self.base())
    }

    /// Endpoint for appending to graphs
    pub fn data_endpoint(&self) -> String {
        format!("{}/data/", self.base())
    }

    /// Endpoint addressing one named graph
    ///
    /// The graph URI is percent-encoded as a single path segment, so its
    /// `/`, `?` and `#` stay part of the graph name.
    pub fn graph_endpoint(&self, graph_uri: &str) -> Result<Url> {
        let invalid = |reason: String| FourStoreError::InvalidUrl {
            url: self.url.clone(),
            reason,
        };

        let mut url = Url::parse(self.base()).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("data")
            .push(graph_uri);
        Ok(url)
    }

    /// Status endpoint
    pub fn status_endpoint(&self) -> String {
        format!("{}/status/", self.base())
    }
}
