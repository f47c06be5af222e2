//! The edited timeline: keep segments laid out back to back.
//!
//! Each [`KeepSegment`] remembers where it came from on the source media and
//! where it starts on the output. The [`Timeline`] owns the ordered list and
//! answers mapping queries in both directions, which is what subtitle cues
//! need to follow the cut.

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::interval::FrameRange;
use crate::timecode::{FrameRate, Timecode};

/// A contiguous span of source media retained in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct KeepSegment {
    source_start: Timecode,
    source_end: Timecode,
    timeline_start: Timecode,
}

impl KeepSegment {
    /// Create a segment from a source frame range placed at `timeline_start`.
    pub fn new(source: FrameRange, timeline_start: i64, rate: FrameRate) -> ModelResult<Self> {
        if source.is_empty() || source.start < 0 || timeline_start < 0 {
            return Err(ModelError::InvalidTimeline {
                message: format!(
                    "segment [{}, {}) at {timeline_start} is empty or negative",
                    source.start, source.end
                ),
            });
        }
        Ok(Self {
            source_start: Timecode::new(source.start, rate),
            source_end: Timecode::new(source.end, rate),
            timeline_start: Timecode::new(timeline_start, rate),
        })
    }

    pub fn source_start(&self) -> Timecode {
        self.source_start
    }

    pub fn source_end(&self) -> Timecode {
        self.source_end
    }

    pub fn timeline_start(&self) -> Timecode {
        self.timeline_start
    }

    /// Timeline position one past the last frame of this segment.
    pub fn timeline_end(&self) -> Timecode {
        self.timeline_start.add_frames(self.len_frames())
    }

    /// Segment length.
    pub fn duration(&self) -> Timecode {
        Timecode::new(self.len_frames(), self.source_start.rate())
    }

    pub fn len_frames(&self) -> i64 {
        self.source_end.frames() - self.source_start.frames()
    }

    /// Covered source frames.
    pub fn source_range(&self) -> FrameRange {
        FrameRange::new(self.source_start.frames(), self.source_end.frames())
    }

    /// Covered timeline frames.
    pub fn timeline_range(&self) -> FrameRange {
        FrameRange::new(self.timeline_start.frames(), self.timeline_end().frames())
    }

    /// Source position of timeline frame `t`, measured from this segment's
    /// start. Positions outside the segment extrapolate linearly.
    pub fn source_at(&self, t: Timecode) -> Timecode {
        self.source_start
            .add_frames(t.frames() - self.timeline_start.frames())
    }
}

/// Ordered, gap-free list of keep segments.
///
/// Invariants (checked on construction):
/// - at least one segment, all at the timeline's rate;
/// - source ranges ascending and non-overlapping;
/// - the first segment starts at timeline frame 0 and each following segment
///   starts where the previous one ends;
/// - `duration` equals the sum of segment lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    rate: FrameRate,
    segments: Vec<KeepSegment>,
    duration: Timecode,
}

impl Timeline {
    /// Validate and wrap a list of segments.
    pub fn from_segments(rate: FrameRate, segments: Vec<KeepSegment>) -> ModelResult<Self> {
        let invalid = |message: String| ModelError::InvalidTimeline { message };

        if segments.is_empty() {
            return Err(invalid("timeline has no segments".to_string()));
        }

        let mut cursor = 0;
        let mut prev_source_end: Option<i64> = None;
        for (i, segment) in segments.iter().enumerate() {
            if segment.source_start.rate() != rate || segment.timeline_start.rate() != rate {
                return Err(ModelError::RateMismatch {
                    left: rate,
                    right: segment.source_start.rate(),
                });
            }
            if segment.timeline_start.frames() != cursor {
                return Err(invalid(format!(
                    "segment {i} starts at timeline frame {} but previous content ends at {cursor}",
                    segment.timeline_start.frames()
                )));
            }
            if let Some(prev_end) = prev_source_end {
                if segment.source_start.frames() < prev_end {
                    return Err(invalid(format!(
                        "segment {i} source start {} overlaps previous end {prev_end}",
                        segment.source_start.frames()
                    )));
                }
            }
            cursor += segment.len_frames();
            prev_source_end = Some(segment.source_end.frames());
        }

        Ok(Self {
            rate,
            segments,
            duration: Timecode::new(cursor, rate),
        })
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    pub fn segments(&self) -> &[KeepSegment] {
        &self.segments
    }

    /// Total output duration.
    pub fn duration(&self) -> Timecode {
        self.duration
    }

    /// Frame one past the last kept source frame.
    pub fn source_end(&self) -> Timecode {
        // Non-empty by construction.
        self.segments
            .last()
            .map(KeepSegment::source_end)
            .unwrap_or_else(|| Timecode::zero(self.rate))
    }

    /// The keep segment containing source time `t`, if it was kept.
    pub fn segment_at_source(&self, t: Timecode) -> ModelResult<Option<&KeepSegment>> {
        self.check_rate(t)?;
        let idx = self.first_ending_after_source(t.frames());
        Ok(self
            .segments
            .get(idx)
            .filter(|s| s.source_range().contains(t.frames())))
    }

    /// Map a source timestamp onto the edited timeline.
    ///
    /// Times inside removed material snap to the start of the next kept
    /// segment, which is the same timeline position as the end of the
    /// previous one. Times before the first segment map to zero and times
    /// after the last map to the total duration.
    pub fn reproject(&self, t: Timecode) -> ModelResult<Timecode> {
        self.check_rate(t)?;
        let frame = t.frames();
        let idx = self.first_ending_after_source(frame);
        let Some(segment) = self.segments.get(idx) else {
            return Ok(self.duration);
        };
        if frame < segment.source_start.frames() {
            return Ok(segment.timeline_start);
        }
        Ok(segment
            .timeline_start
            .add_frames(frame - segment.source_start.frames()))
    }

    /// Map a source time in seconds onto the timeline, rounding once to the
    /// nearest source frame.
    pub fn reproject_seconds(&self, secs: f64) -> ModelResult<Timecode> {
        self.reproject(Timecode::from_seconds(secs, self.rate)?)
    }

    /// Map a timeline timestamp back to the source media.
    pub fn to_source(&self, t: Timecode) -> ModelResult<Timecode> {
        self.check_rate(t)?;
        let frame = t.frames().max(0);
        let idx = self
            .segments
            .partition_point(|s| s.timeline_end().frames() <= frame);
        let Some(segment) = self.segments.get(idx) else {
            return Ok(self.source_end());
        };
        Ok(segment.source_at(Timecode::new(frame, self.rate)))
    }

    /// The keep segment playing at timeline time `t`.
    pub fn segment_at_timeline(&self, t: Timecode) -> ModelResult<Option<&KeepSegment>> {
        self.check_rate(t)?;
        let frame = t.frames();
        let idx = self
            .segments
            .partition_point(|s| s.timeline_end().frames() <= frame);
        Ok(self
            .segments
            .get(idx)
            .filter(|s| s.timeline_range().contains(frame)))
    }

    /// Index of the first segment whose source end lies after `frame`.
    fn first_ending_after_source(&self, frame: i64) -> usize {
        self.segments
            .partition_point(|s| s.source_end.frames() <= frame)
    }

    fn check_rate(&self, t: Timecode) -> ModelResult<()> {
        if t.rate() != self.rate {
            return Err(ModelError::RateMismatch {
                left: self.rate,
                right: t.rate(),
            });
        }
        Ok(())
    }
}
