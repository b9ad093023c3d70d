use rdfbind_datasource::{
    DataSource, DataSourceConfig, DataSourceError, DataSourceFactory, Result,
};

use crate::{FourStoreConfig, FourStoreDataSource, HttpStore};

/// Creates [`FourStoreDataSource`]s over HTTP, registered as `"4store"`.
///
/// Recognised keys: `url` (required), `query_timeout_ms`,
/// `update_timeout_ms`, `connect_timeout_ms`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FourStoreDataSourceFactory;

impl FourStoreDataSourceFactory {
    pub const ALIAS: &'static str = "4store";

    /// Typed client settings, with defaults for the missing timeouts.
    pub fn store_config(&self, config: &DataSourceConfig) -> Result<FourStoreConfig> {
        config.deserialize()
    }
}

impl DataSourceFactory for FourStoreDataSourceFactory {
    fn alias(&self) -> &'static str {
        Self::ALIAS
    }

    fn can_create(&self, config: &DataSourceConfig) -> bool {
        config
            .get_str("url")
            .is_some_and(|url| !url.trim().is_empty())
    }

    fn create(&self, config: &DataSourceConfig) -> Result<Box<dyn DataSource>> {
        let config = self.store_config(config)?;
        let span = tracing::info_span!("fourstore", url = %config.url);
        let store = HttpStore::new(config).map_err(DataSourceError::backend)?;

        Ok(Box::new(FourStoreDataSource::with_span(Box::new(store), span)))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn can_create_requires_a_url() {
        let factory = FourStoreDataSourceFactory;
        assert_eq!(factory.alias(), "4store");
        assert!(!factory.can_create(&DataSourceConfig::new()));
        assert!(!factory.can_create(&DataSourceConfig::new().with("url", "  ")));
        assert!(factory.can_create(&DataSourceConfig::new().with("url", "http://localhost:8000")));
    }

    #[test]
    fn store_config_applies_default_timeouts() {
        let config = FourStoreDataSourceFactory
            .store_config(&DataSourceConfig::new().with("url", "http://localhost:8000"))
            .unwrap_or_else(|e| panic!("config should parse: {e}"));

        assert_eq!(config, FourStoreConfig::new("http://localhost:8000"));
        assert_eq!(config.query_timeout(), Duration::from_secs(60));
        assert_eq!(config.update_timeout(), Duration::from_secs(300));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn create_returns_an_unconnected_data_source() {
        let config = DataSourceConfig::new()
            .with("url", "http://localhost:8000")
            .with("query_timeout_ms", 500);

        let Ok(data_source) = FourStoreDataSourceFactory.create(&config) else {
            panic!("data source should be created");
        };
        assert_eq!(data_source.name(), "4store");
        assert!(!data_source.is_connected());
        assert!(data_source.as_named_graphs().is_some());
    }

    #[test]
    fn mistyped_option_is_invalid_config() {
        let config = DataSourceConfig::new()
            .with("url", "http://localhost:8000")
            .with("query_timeout_ms", "x");

        let Err(error) = FourStoreDataSourceFactory.create(&config) else {
            panic!("mistyped timeout was accepted");
        };
        assert!(matches!(error, DataSourceError::InvalidConfig(_)), "{error}");
    }
}
