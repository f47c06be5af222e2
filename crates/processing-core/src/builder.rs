//! Timeline assembly.

use jumpcut_project_model::{KeepSegment, Timeline};

use crate::error::{CutError, CutResult};
use crate::keep::CutPlan;

/// Places keep segments back to back on the output timeline.
///
/// Each segment starts where the previous one ended, so the result has no
/// gaps and no overlaps.
pub struct TimelineBuilder;

impl TimelineBuilder {
    pub fn build(plan: &CutPlan) -> CutResult<Timeline> {
        if plan.keeps().is_empty() {
            return Err(CutError::EmptyTimeline {
                duration_secs: plan.duration().to_seconds(),
            });
        }

        let rate = plan.rate();
        let mut cursor = 0;
        let mut segments = Vec::with_capacity(plan.keeps().len());
        for range in plan.keeps() {
            segments.push(KeepSegment::new(*range, cursor, rate)?);
            cursor += range.len();
        }

        Ok(Timeline::from_segments(rate, segments)?)
    }
}
