//! The end-to-end cut: raw silences in, edited timeline out.

use jumpcut_project_model::{MediaInfo, RawInterval, Timecode, Timeline};
use serde::Serialize;

use crate::builder::TimelineBuilder;
use crate::error::CutResult;
use crate::keep::{CutPlan, KeepSegmentComputer};
use crate::merge::SilenceMerger;
use crate::policy::CutPolicy;

/// Summary numbers for a cut, in seconds for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutStats {
    pub original_secs: f64,
    pub kept_secs: f64,
    pub removed_secs: f64,
    /// Silences reported by the analysis pass.
    pub silences_detected: usize,
    /// Silences left after merging.
    pub silences_merged: usize,
    /// Removed spans in the final plan.
    pub cuts: usize,
}

/// Everything the pipeline produced for one clip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutReport {
    pub plan: CutPlan,
    pub timeline: Timeline,
    pub stats: CutStats,
}

/// Runs merge, keep computation and timeline assembly with one policy.
#[derive(Debug, Clone)]
pub struct SilenceCutter {
    merger: SilenceMerger,
    computer: KeepSegmentComputer,
}

impl SilenceCutter {
    /// Create a cutter, rejecting an invalid policy up front.
    pub fn new(policy: CutPolicy) -> CutResult<Self> {
        policy.validate()?;
        Ok(Self {
            merger: SilenceMerger::new(policy.merge_tolerance_frames),
            computer: KeepSegmentComputer::new(policy),
        })
    }

    pub fn policy(&self) -> &CutPolicy {
        self.computer.policy()
    }

    /// Cut a clip of the given duration.
    pub fn cut(&self, duration: Timecode, silences: &[RawInterval]) -> CutResult<CutReport> {
        let rate = duration.rate();
        tracing::info!(
            duration_secs = duration.to_seconds(),
            frame_rate = %rate,
            silences = silences.len(),
            "Cutting silence"
        );

        let merged = self.merger.merge_raw(silences, rate)?;
        let plan = self.computer.compute(duration, &merged)?;
        let timeline = TimelineBuilder::build(&plan)?;

        let stats = CutStats {
            original_secs: duration.to_seconds(),
            kept_secs: timeline.duration().to_seconds(),
            removed_secs: Timecode::new(plan.removed_frames(), rate).to_seconds(),
            silences_detected: silences.len(),
            silences_merged: merged.len(),
            cuts: plan.removed().len(),
        };

        tracing::info!(
            segments = timeline.segments().len(),
            kept_secs = stats.kept_secs,
            removed_secs = stats.removed_secs,
            "Timeline assembled"
        );

        Ok(CutReport {
            plan,
            timeline,
            stats,
        })
    }

    /// Cut a described media file, using its floored frame duration.
    pub fn cut_media(&self, media: &MediaInfo, silences: &[RawInterval]) -> CutResult<CutReport> {
        self.cut(media.duration()?, silences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CutError;
    use jumpcut_project_model::FrameRate;

    fn cutter(min_silence_secs: f64, padding_frames: u32, min_keep_secs: f64) -> SilenceCutter {
        SilenceCutter::new(CutPolicy {
            min_silence_secs,
            padding_frames,
            min_keep_secs,
            merge_tolerance_frames: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_stats_add_up() {
        let report = cutter(0.2, 0, 0.1)
            .cut(
                Timecode::new(250, FrameRate::FPS_25),
                &[RawInterval::new(2.0, 3.0), RawInterval::new(2.5, 4.0)],
            )
            .unwrap();
        assert_eq!(report.stats.silences_detected, 2);
        assert_eq!(report.stats.silences_merged, 1);
        assert_eq!(report.stats.cuts, 1);
        assert!((report.stats.removed_secs - 2.0).abs() < 1e-9);
        assert!((report.stats.kept_secs - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_tolerance_reaches_the_merger() {
        // Two silences three frames apart at 25 fps.
        let silences = [RawInterval::new(2.0, 3.0), RawInterval::new(3.12, 4.0)];
        let duration = Timecode::new(250, FrameRate::FPS_25);
        let with_tolerance = |merge_tolerance_frames| {
            SilenceCutter::new(CutPolicy {
                min_silence_secs: 0.2,
                padding_frames: 0,
                min_keep_secs: 0.0,
                merge_tolerance_frames,
            })
            .unwrap()
            .cut(duration, &silences)
            .unwrap()
        };

        let apart = with_tolerance(2);
        assert_eq!(apart.stats.silences_merged, 2);
        assert_eq!(apart.timeline.segments().len(), 3);

        let joined = with_tolerance(3);
        assert_eq!(joined.stats.silences_merged, 1);
        assert_eq!(joined.timeline.segments().len(), 2);
        assert_eq!(joined.plan.removed()[0].start, 50);
        assert_eq!(joined.plan.removed()[0].end, 100);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let result = SilenceCutter::new(CutPolicy {
            min_silence_secs: -0.1,
            padding_frames: 0,
            min_keep_secs: 0.0,
            merge_tolerance_frames: 0,
        });
        assert!(matches!(result, Err(CutError::InvalidPolicy { .. })));
    }

    #[test]
    fn test_malformed_input_propagates() {
        let result = cutter(0.2, 0, 0.1).cut(
            Timecode::new(250, FrameRate::FPS_25),
            &[RawInterval::new(4.0, 3.0)],
        );
        assert!(matches!(result, Err(CutError::Model(_))));
    }
}
