mod error;
mod loader;

pub(crate) use error::ConfigError;
pub(crate) use loader::load_configuration;
use rdfbind_datasource::DataSourceConfig;
use rdfbind_testkit::TestDataSourceFactory;
use serde::{Deserialize, Serialize};

pub(crate) use crate::logger::{LogFormat, LoggerConfig};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    pub logger: LoggerConfig,
    pub data_source: DataSourceSection,
}

/// The `[data_source]` table: a factory alias plus the options handed to it.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub(crate) struct DataSourceSection {
    pub factory: String,
    #[serde(flatten)]
    pub options: DataSourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger: LoggerConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
            data_source: DataSourceSection {
                factory: TestDataSourceFactory::ALIAS.to_string(),
                options: DataSourceConfig::new(),
            },
        }
    }
}

impl Config {
    fn validate(self) -> Result<Self, ConfigError> {
        if self.data_source.factory.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "data_source.factory must name a registered factory".to_string(),
            ));
        }
        Ok(self)
    }
}
