//! Export errors.

use std::path::PathBuf;

use jumpcut_project_model::{FrameRate, ModelError};

/// Errors raised before any document text is produced.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Frame rate {rate} is not supported by FCPXML export")]
    UnsupportedFrameRate { rate: FrameRate },

    #[error("Media path must be absolute: {}", path.display())]
    RelativeMediaPath { path: PathBuf },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type ExportResult<T> = Result<T, ExportError>;
