//! Silence intervals and frame ranges.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::timecode::{FrameRate, Timecode};

/// A silence span in seconds as reported by the audio analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInterval {
    /// Start time in seconds.
    #[serde(alias = "start")]
    pub start_secs: f64,
    /// End time in seconds.
    #[serde(alias = "end")]
    pub end_secs: f64,
}

impl RawInterval {
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

impl From<(f64, f64)> for RawInterval {
    fn from((start_secs, end_secs): (f64, f64)) -> Self {
        Self::new(start_secs, end_secs)
    }
}

/// A frame-aligned silence span `[start, end)`.
///
/// Invariant: `start < end` and both share one frame rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SilenceInterval {
    start: Timecode,
    end: Timecode,
}

impl SilenceInterval {
    /// Create an interval from two timecodes of the same rate.
    pub fn new(start: Timecode, end: Timecode) -> ModelResult<Self> {
        start.ensure_same_rate(&end)?;
        if start.frames() >= end.frames() {
            return Err(ModelError::MalformedInterval {
                start_secs: start.to_seconds(),
                end_secs: end.to_seconds(),
            });
        }
        Ok(Self { start, end })
    }

    /// Round a raw interval onto the frame grid.
    ///
    /// Fails with `MalformedInterval` when the input is negative or
    /// non-finite, or when it does not span at least one frame once rounded.
    pub fn from_raw(raw: RawInterval, rate: FrameRate) -> ModelResult<Self> {
        let malformed = || ModelError::MalformedInterval {
            start_secs: raw.start_secs,
            end_secs: raw.end_secs,
        };
        if !raw.start_secs.is_finite() || !raw.end_secs.is_finite() || raw.start_secs < 0.0 {
            return Err(malformed());
        }
        let start = Timecode::from_seconds(raw.start_secs, rate)?;
        let end = Timecode::from_seconds(raw.end_secs, rate)?;
        if start.frames() >= end.frames() {
            return Err(malformed());
        }
        Ok(Self { start, end })
    }

    /// Build from a frame range at the given rate.
    pub fn from_range(range: FrameRange, rate: FrameRate) -> ModelResult<Self> {
        Self::new(Timecode::new(range.start, rate), Timecode::new(range.end, rate))
    }

    pub fn start(&self) -> Timecode {
        self.start
    }

    pub fn end(&self) -> Timecode {
        self.end
    }

    pub fn rate(&self) -> FrameRate {
        self.start.rate()
    }

    /// Length in frames (always positive).
    pub fn len_frames(&self) -> i64 {
        self.end.frames() - self.start.frames()
    }

    /// The covered frames as a plain range.
    pub fn range(&self) -> FrameRange {
        FrameRange::new(self.start.frames(), self.end.frames())
    }
}

/// A half-open range of frames `[start, end)` on one time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
    pub start: i64,
    pub end: i64,
}

impl FrameRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Number of frames covered (zero for empty or inverted ranges).
    pub fn len(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, frame: i64) -> bool {
        frame >= self.start && frame < self.end
    }

    /// Intersection with `[lo, hi)`, possibly empty.
    pub fn clamp_to(&self, lo: i64, hi: i64) -> FrameRange {
        FrameRange::new(self.start.max(lo), self.end.min(hi))
    }

    /// Start and end converted to seconds at `rate`.
    pub fn to_seconds(&self, rate: FrameRate) -> (f64, f64) {
        (
            Timecode::new(self.start, rate).to_seconds(),
            Timecode::new(self.end, rate).to_seconds(),
        )
    }
}
