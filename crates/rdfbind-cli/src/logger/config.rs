use serde::{Deserialize, Serialize};

/// The `[logger]` table of `rdfbind.toml`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct LoggerConfig {
    /// `EnvFilter` directive, e.g. "warn" or "rdfbind_fourstore=debug,info"
    /// to see the requests sent to 4store
    pub level: String,
    /// "pretty" for terminals, "json" for one object per event
    pub format: LogFormat,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LogFormat {
    Pretty,
    Json,
}
