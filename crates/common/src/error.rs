//! Error types shared across Jumpcut crates.

use std::path::PathBuf;

use jumpcut_project_model::ModelError;

/// Top-level error type for the I/O and collaborator plumbing around the
/// cut pipeline.
#[derive(Debug, thiserror::Error)]
pub enum JumpcutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Result type alias using JumpcutError.
pub type JumpcutResult<T> = Result<T, JumpcutError>;

impl JumpcutError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
