//! Errors raised by the cut pipeline.

use jumpcut_project_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum CutError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Nothing left to keep in {duration_secs:.3}s of media after removing silence")]
    EmptyTimeline { duration_secs: f64 },

    #[error("Invalid cut policy: {message}")]
    InvalidPolicy { message: String },
}

pub type CutResult<T> = Result<T, CutError>;
