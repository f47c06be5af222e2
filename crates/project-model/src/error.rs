//! Errors raised while constructing or loading model values.

use std::path::PathBuf;

use crate::timecode::FrameRate;

/// Errors that can occur when working with the project model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid frame rate {rate}: numerator and denominator must be positive integers")]
    InvalidFrameRate { rate: String },

    #[error("Malformed interval [{start_secs}, {end_secs}): start must precede end after frame rounding")]
    MalformedInterval { start_secs: f64, end_secs: f64 },

    #[error("Cannot convert non-finite or out-of-range seconds value {value}")]
    NonFiniteSeconds { value: f64 },

    #[error("Frame rate mismatch: {left} vs {right}; rebase explicitly before combining")]
    RateMismatch { left: FrameRate, right: FrameRate },

    #[error("Invalid timeline: {message}")]
    InvalidTimeline { message: String },

    #[error("Invalid caption: {message}")]
    InvalidCaption { message: String },

    #[error("Invalid project: {message}")]
    InvalidProject { message: String },

    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Result type alias using ModelError.
pub type ModelResult<T> = Result<T, ModelError>;
