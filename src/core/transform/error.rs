//! Transform Error Types

use thiserror::Error;

/// Errors raised while building query transforms.
///
/// Bad rule rows never end up here; they are reported through the
/// diagnostics sink and skipped.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Invalid query transform type: {0}")]
    InvalidTransformType(String),

    #[error("Rules file not found: {path}")]
    RulesNotFound { path: String },

    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
