use crate::error::{AnalyticsError, AnalyticsResult};
use serde::Deserialize;
use std::path::Path;

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `REWARDS360__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Where the user/offer/redemption fixture is read from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_backend")]
    pub backend: HistoryBackend,
    #[serde(default = "default_history_path")]
    pub path: String,
}

fn default_node_id() -> String {
    "rewards360-01".to_string()
}
fn default_history_backend() -> HistoryBackend {
    HistoryBackend::File
}
fn default_history_path() -> String {
    "data/report_history.jsonl".to_string()
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            backend: default_history_backend(),
            path: default_history_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            data: DataConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `rewards360.toml` (if present) and the environment.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load with an explicit config file. A missing explicit file is an error;
    /// the default file is optional.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name("rewards360").required(false),
        };

        let builder = config::Config::builder().add_source(file).add_source(
            config::Environment::with_prefix("REWARDS360")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Reject settings that deserialize but cannot be used.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.data.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(AnalyticsError::Config("data.path is set but empty".into()));
        }
        if self.history.backend == HistoryBackend::File && self.history.path.trim().is_empty() {
            return Err(AnalyticsError::Config(
                "history.path is required for the file backend".into(),
            ));
        }
        Ok(())
    }
}
