use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use super::{Config, ConfigError};

/// Picked up from the working directory when present.
pub(crate) const LOCAL_CONFIG_FILE: &str = "rdfbind.toml";
pub(crate) const ENV_PREFIX: &str = "RDFBIND_";

pub(crate) fn load_configuration(custom_config_path: Option<&Path>) -> Result<Config, ConfigError> {
    load_layers(Path::new(LOCAL_CONFIG_FILE), custom_config_path)
}

/// Layered sources, lowest priority first: defaults, the local config file,
/// the custom config file, then `RDFBIND_*` environment variables.
fn load_layers(local_path: &Path, custom_config_path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if local_path.exists() {
        figment = figment.merge(Toml::file(local_path));
    }

    if let Some(config_path) = custom_config_path {
        if !config_path.exists() {
            return Err(ConfigError::MissingConfig(
                config_path.display().to_string(),
            ));
        }
        figment = figment.merge(Toml::file(config_path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract().map_err(Box::new)?;
    config.validate()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::fs;

    use super::*;
    use crate::config::LogFormat;

    fn missing() -> &'static Path {
        Path::new("/nonexistent/rdfbind/rdfbind.toml")
    }

    #[test]
    fn defaults_without_files() {
        let config = load_layers(missing(), None).unwrap();
        assert_eq!(config.logger.level, "info");
        assert_eq!(config.logger.format, LogFormat::Pretty);
        assert_eq!(config.data_source.factory, "test");
        assert!(config.data_source.options.get("url").is_none());
    }

    #[test]
    fn custom_file_overrides_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("rdfbind.toml");
        fs::write(
            &local,
            "[logger]\nlevel = \"debug\"\n\n[data_source]\nfactory = \"test\"\nfiles = \"a.ttl\"\n",
        )
        .unwrap();
        let custom = dir.path().join("custom.toml");
        fs::write(
            &custom,
            "[logger]\nformat = \"json\"\n\n[data_source]\nfactory = \"4store\"\nurl = \"http://localhost:8000\"\nquery_timeout_ms = 500\n",
        )
        .unwrap();

        let config = load_layers(&local, Some(&custom)).unwrap();
        assert_eq!(config.logger.level, "debug");
        assert_eq!(config.logger.format, LogFormat::Json);
        assert_eq!(config.data_source.factory, "4store");
        assert_eq!(
            config.data_source.options.get_str("url").as_deref(),
            Some("http://localhost:8000")
        );
        assert_eq!(
            config.data_source.options.get_str("query_timeout_ms").as_deref(),
            Some("500")
        );
        // Tables merge key by key, so the local `files` entry survives.
        assert_eq!(
            config.data_source.options.get_str("files").as_deref(),
            Some("a.ttl")
        );
    }

    #[test]
    fn missing_custom_file_is_an_error() {
        let result = load_layers(missing(), Some(Path::new("/nonexistent/custom.toml")));
        assert!(matches!(result, Err(ConfigError::MissingConfig(_))));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[logger]\nformat = \"xml\"\n").unwrap();

        let result = load_layers(missing(), Some(&custom));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn blank_factory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("custom.toml");
        fs::write(&custom, "[data_source]\nfactory = \" \"\n").unwrap();

        let result = load_layers(missing(), Some(&custom));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }
}
