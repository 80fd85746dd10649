//! CLI error types.

use quill_blocks::SourceError;
use quill_config::ConfigError;
use quill_lexical::DocumentError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Document(#[from] DocumentError),

    #[error("Invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Validation(String),
}
