//! Data source factories and the alias-keyed registry that holds them.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    data_source::DataSource,
    error::{DataSourceError, Result},
};

/// String-keyed configuration handed to a [`DataSourceFactory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataSourceConfig(BTreeMap<String, Value>);

impl DataSourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value of `key` as text; non-string values use their JSON rendering.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Deserialize the whole map into a typed configuration.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let object = Value::Object(self.0.clone().into_iter().collect());
        serde_json::from_value(object).map_err(|e| DataSourceError::InvalidConfig(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataSourceConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Builds data sources from configuration.
pub trait DataSourceFactory: Send + Sync {
    /// Key the factory is registered under
    fn alias(&self) -> &'static str;

    fn can_create(&self, config: &DataSourceConfig) -> bool;

    fn create(&self, config: &DataSourceConfig) -> Result<Box<dyn DataSource>>;
}

/// Factories by alias.
#[derive(Default, Clone)]
pub struct DataSourceRegistry {
    factories: BTreeMap<&'static str, Arc<dyn DataSourceFactory>>,
}

impl DataSourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory`, replacing any factory with the same alias.
    pub fn register(&mut self, factory: Arc<dyn DataSourceFactory>) {
        let alias = factory.alias();
        if self.factories.insert(alias, factory).is_some() {
            tracing::debug!(alias, "Replaced data source factory");
        }
    }

    pub fn get(&self, alias: &str) -> Option<Arc<dyn DataSourceFactory>> {
        self.factories.get(alias).cloned()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn create(&self, alias: &str, config: &DataSourceConfig) -> Result<Box<dyn DataSource>> {
        let factory = self
            .get(alias)
            .ok_or_else(|| DataSourceError::UnknownFactory(alias.to_string()))?;

        if !factory.can_create(config) {
            return Err(DataSourceError::InvalidConfig(format!(
                "factory '{alias}' cannot create a data source from the given configuration"
            )));
        }

        let data_source = factory.create(config)?;
        tracing::debug!(alias, data_source = data_source.name(), "Created data source");
        Ok(data_source)
    }
}

impl std::fmt::Debug for DataSourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
