//! Cut policy: the knobs that decide which silences are removed.

use jumpcut_project_model::{FrameRate, Timecode};
use serde::{Deserialize, Serialize};

use crate::error::{CutError, CutResult};

/// Silence-cut policy, built by the caller from its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPolicy {
    /// Silences shorter than this (seconds) are left in the timeline.
    pub min_silence_secs: f64,

    /// Frames retained on each side of a removed silence.
    pub padding_frames: u32,

    /// Keep segments shorter than this (seconds) are dropped.
    pub min_keep_secs: f64,

    /// Silences separated by at most this many frames are merged.
    pub merge_tolerance_frames: u32,
}

/// The keep-computation thresholds of a [`CutPolicy`], resolved against one
/// frame rate. The merge tolerance is already in frames and goes straight
/// to [`SilenceMerger`](crate::merge::SilenceMerger).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePolicy {
    pub min_silence_frames: i64,
    pub padding_frames: i64,
    pub min_keep_frames: i64,
}

impl CutPolicy {
    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> CutResult<()> {
        for (name, value) in [
            ("min_silence_secs", self.min_silence_secs),
            ("min_keep_secs", self.min_keep_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CutError::InvalidPolicy {
                    message: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Convert second thresholds to frames at `rate`.
    ///
    /// Thresholds round up: for a whole number of frames `n`,
    /// `n < x` holds exactly when `n < ceil(x)`, so "shorter than" stays exact.
    pub fn resolve(&self, rate: FrameRate) -> CutResult<FramePolicy> {
        self.validate()?;
        Ok(FramePolicy {
            min_silence_frames: Timecode::from_seconds_ceil(self.min_silence_secs, rate)?.frames(),
            padding_frames: self.padding_frames as i64,
            min_keep_frames: Timecode::from_seconds_ceil(self.min_keep_secs, rate)?.frames(),
        })
    }
}
