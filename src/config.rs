use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::transform::{
    CleanerConfig, DefaultCleaner, DiagnosticsSink, LogSink, TransformFactory, TransformPipeline,
    TransformResult, TransformSpec,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log: LogConfig,
    pub cleaner: CleanerConfig,
    pub transforms: Vec<TransformSpec>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. "info", "debug").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl AppConfig {
    /// Load configuration from `~/.config/qxform/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Load configuration from an explicit file. Errors are returned, not defaulted.
    pub fn from_toml_file(path: &Path) -> TransformResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from TOML string
    pub fn from_toml_str(content: &str) -> TransformResult<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Default config file location.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("qxform").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Factory using the configured cleaner and the given diagnostics sink.
    pub fn factory(&self, sink: Arc<dyn DiagnosticsSink>) -> TransformFactory {
        TransformFactory::new()
            .with_cleaner(Arc::new(DefaultCleaner::new(self.cleaner.clone())))
            .with_sink(sink)
    }

    /// Build the configured pipeline, logging diagnostics.
    ///
    /// `base_dir` anchors relative `rules_path` entries, normally the config
    /// file's directory.
    pub fn pipeline(&self, base_dir: Option<&Path>) -> TransformResult<TransformPipeline> {
        TransformPipeline::from_specs(&self.transforms, base_dir, self.factory(Arc::new(LogSink)))
    }
}
