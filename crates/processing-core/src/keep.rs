//! Keep-segment computation: the complement of the removed silence.
//!
//! Silence edges arrive already rounded to the nearest frame (see
//! [`SilenceInterval::from_raw`]); keep boundaries are exactly those frames,
//! with no further floor or ceil toward the speech.
//!
//! # Algorithm
//!
//! 1. **Clamp** every merged silence to `[0, D)`, dropping those outside.
//! 2. **Filter** silences shorter than the minimum silence length; they stay.
//! 3. **Pad** each remaining silence inward on every side that borders kept
//!    material. A silence fully eaten by padding is not cut at all, so the
//!    keeps on either side meet exactly and join.
//! 4. **Complement** the removed spans against `[0, D)`.
//! 5. **Drop** keep segments shorter than the minimum keep length; their
//!    frames join the removed material.

use jumpcut_project_model::{FrameRange, FrameRate, SilenceInterval, Timecode};
use serde::Serialize;

use crate::error::{CutError, CutResult};
use crate::policy::{CutPolicy, FramePolicy};

/// Kept and removed source ranges for one clip.
///
/// Both lists are ascending and disjoint, and together they tile `[0, D)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CutPlan {
    rate: FrameRate,
    duration: Timecode,
    keeps: Vec<FrameRange>,
    removed: Vec<FrameRange>,
}

impl CutPlan {
    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    /// Source clip duration.
    pub fn duration(&self) -> Timecode {
        self.duration
    }

    pub fn keeps(&self) -> &[FrameRange] {
        &self.keeps
    }

    pub fn removed(&self) -> &[FrameRange] {
        &self.removed
    }

    pub fn kept_frames(&self) -> i64 {
        self.keeps.iter().map(FrameRange::len).sum()
    }

    pub fn removed_frames(&self) -> i64 {
        self.removed.iter().map(FrameRange::len).sum()
    }
}

/// Derives the segments to retain from a merged silence set.
#[derive(Debug, Clone)]
pub struct KeepSegmentComputer {
    policy: CutPolicy,
}

impl KeepSegmentComputer {
    pub fn new(policy: CutPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CutPolicy {
        &self.policy
    }

    /// Compute keep and removed ranges for a clip of length `duration`.
    ///
    /// `silences` should come from the merger (ascending, disjoint); they
    /// are re-sorted here so a hand-built list is handled too.
    pub fn compute(&self, duration: Timecode, silences: &[SilenceInterval]) -> CutResult<CutPlan> {
        let rate = duration.rate();
        let policy = self.policy.resolve(rate)?;
        let total = duration.frames();

        if total <= 0 {
            return Err(CutError::EmptyTimeline {
                duration_secs: duration.to_seconds(),
            });
        }

        let mut ranges = Vec::with_capacity(silences.len());
        for silence in silences {
            duration.ensure_same_rate(&silence.start())?;
            ranges.push(silence.range());
        }
        ranges.sort_by_key(|r| (r.start, r.end));

        let removed = removable_spans(&ranges, total, &policy);
        let candidates = complement(&removed, total);

        let (keeps, dropped): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|k| k.len() >= policy.min_keep_frames);
        for short in &dropped {
            tracing::debug!(
                start = short.start,
                end = short.end,
                min_keep_frames = policy.min_keep_frames,
                "Dropping keep segment below minimum length"
            );
        }

        if keeps.is_empty() {
            return Err(CutError::EmptyTimeline {
                duration_secs: duration.to_seconds(),
            });
        }

        let removed = complement(&keeps, total);
        Ok(CutPlan {
            rate,
            duration,
            keeps,
            removed,
        })
    }
}

/// Steps 1–3: clamp, filter by length, and pad the silences.
fn removable_spans(silences: &[FrameRange], total: i64, policy: &FramePolicy) -> Vec<FrameRange> {
    let mut removed: Vec<FrameRange> = Vec::with_capacity(silences.len());

    for silence in silences {
        let clamped = silence.clamp_to(0, total);
        if clamped.is_empty() {
            continue;
        }
        if clamped.len() < policy.min_silence_frames {
            tracing::debug!(
                start = clamped.start,
                end = clamped.end,
                min_silence_frames = policy.min_silence_frames,
                "Keeping silence below minimum length"
            );
            continue;
        }

        // Padding only applies where the silence borders kept material.
        let start = if clamped.start > 0 {
            clamped.start + policy.padding_frames
        } else {
            clamped.start
        };
        let end = if clamped.end < total {
            clamped.end - policy.padding_frames
        } else {
            clamped.end
        };
        let span = FrameRange::new(start, end);
        if span.is_empty() {
            continue;
        }

        if let Some(last) = removed.last_mut() {
            if span.start <= last.end {
                last.end = last.end.max(span.end);
                continue;
            }
        }
        removed.push(span);
    }

    removed
}

/// Gaps of an ascending, disjoint range list within `[0, total)`.
fn complement(ranges: &[FrameRange], total: i64) -> Vec<FrameRange> {
    let mut gaps = Vec::with_capacity(ranges.len() + 1);
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            gaps.push(FrameRange::new(cursor, range.start));
        }
        cursor = cursor.max(range.end);
    }
    if cursor < total {
        gaps.push(FrameRange::new(cursor, total));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpcut_project_model::RawInterval;

    const RATE: FrameRate = FrameRate::FPS_24;

    fn policy(min_silence_secs: f64, padding_frames: u32, min_keep_secs: f64) -> CutPolicy {
        CutPolicy {
            min_silence_secs,
            padding_frames,
            min_keep_secs,
            merge_tolerance_frames: 0,
        }
    }

    fn silence(start: i64, end: i64) -> SilenceInterval {
        SilenceInterval::new(Timecode::new(start, RATE), Timecode::new(end, RATE)).unwrap()
    }

    fn ranges(list: &[FrameRange]) -> Vec<(i64, i64)> {
        list.iter().map(|r| (r.start, r.end)).collect()
    }

    #[test]
    fn test_no_silence_keeps_everything() {
        let plan = KeepSegmentComputer::new(policy(0.2, 0, 0.1))
            .compute(Timecode::new(240, RATE), &[])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 240)]);
        assert!(plan.removed().is_empty());
    }

    #[test]
    fn test_interior_silence_is_removed() {
        let plan = KeepSegmentComputer::new(policy(0.2, 0, 0.1))
            .compute(Timecode::new(240, RATE), &[silence(72, 96)])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 72), (96, 240)]);
        assert_eq!(ranges(plan.removed()), vec![(72, 96)]);
        assert_eq!(plan.kept_frames() + plan.removed_frames(), 240);
    }

    #[test]
    fn test_short_silence_is_kept() {
        // 0.2s at 24 fps is 4.8 -> 5 frames; a 4 frame silence stays.
        let plan = KeepSegmentComputer::new(policy(0.2, 0, 0.1))
            .compute(Timecode::new(240, RATE), &[silence(120, 124)])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 240)]);
    }

    #[test]
    fn test_padding_shrinks_interior_silence() {
        let plan = KeepSegmentComputer::new(policy(0.0, 3, 0.0))
            .compute(Timecode::new(240, RATE), &[silence(100, 140)])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 103), (137, 240)]);
    }

    #[test]
    fn test_padding_at_clip_edges_is_one_sided() {
        let plan = KeepSegmentComputer::new(policy(0.0, 3, 0.0))
            .compute(
                Timecode::new(240, RATE),
                &[silence(0, 24), silence(200, 260)],
            )
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(21, 203)]);
        assert_eq!(ranges(plan.removed()), vec![(0, 21), (203, 240)]);
    }

    #[test]
    fn test_padding_larger_than_silence_joins_neighbours() {
        // 2 * 4 padding >= 6 frame silence: neighbours meet, nothing is cut.
        let plan = KeepSegmentComputer::new(policy(0.0, 4, 0.0))
            .compute(Timecode::new(240, RATE), &[silence(100, 106)])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 240)]);
    }

    #[test]
    fn test_short_keep_segment_is_dropped() {
        // The 2 frame island between the silences is below 0.1s (3 frames).
        let plan = KeepSegmentComputer::new(policy(0.0, 0, 0.1))
            .compute(
                Timecode::new(240, RATE),
                &[silence(50, 100), silence(102, 150)],
            )
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 50), (150, 240)]);
        assert_eq!(ranges(plan.removed()), vec![(50, 150)]);
    }

    #[test]
    fn test_silence_past_end_is_clamped() {
        let plan = KeepSegmentComputer::new(policy(0.0, 0, 0.0))
            .compute(
                Timecode::new(240, RATE),
                &[silence(230, 300), silence(400, 500)],
            )
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 230)]);
        assert_eq!(plan.kept_frames() + plan.removed_frames(), 240);
    }

    #[test]
    fn test_all_silence_is_empty_timeline() {
        let result = KeepSegmentComputer::new(policy(0.0, 0, 0.0))
            .compute(Timecode::new(240, RATE), &[silence(0, 240)]);
        assert!(matches!(result, Err(CutError::EmptyTimeline { .. })));

        let zero = KeepSegmentComputer::new(policy(0.0, 0, 0.0)).compute(Timecode::new(0, RATE), &[]);
        assert!(matches!(zero, Err(CutError::EmptyTimeline { .. })));
    }

    #[test]
    fn test_only_short_keeps_is_empty_timeline() {
        let result = KeepSegmentComputer::new(policy(0.0, 0, 1.0))
            .compute(Timecode::new(30, RATE), &[silence(10, 20)]);
        assert!(matches!(result, Err(CutError::EmptyTimeline { .. })));
    }

    #[test]
    fn test_rate_mismatch_rejected() {
        let result = KeepSegmentComputer::new(policy(0.0, 0, 0.0))
            .compute(Timecode::new(250, FrameRate::FPS_25), &[silence(10, 20)]);
        assert!(matches!(result, Err(CutError::Model(_))));
    }

    #[test]
    fn test_keep_boundaries_follow_nearest_frame_silence_edges() {
        // At 23.976 fps, 3.0s is frame 71.93 and 4.0s is frame 95.90.
        let rate = FrameRate::FPS_23_976;
        let silence = SilenceInterval::from_raw(RawInterval::new(3.0, 4.0), rate).unwrap();
        let plan = KeepSegmentComputer::new(policy(0.0, 0, 0.0))
            .compute(Timecode::new(240, rate), &[silence])
            .unwrap();
        assert_eq!(ranges(plan.keeps()), vec![(0, 72), (96, 240)]);
    }

    #[test]
    fn test_complement() {
        let gaps = complement(&[FrameRange::new(0, 5), FrameRange::new(10, 12)], 20);
        assert_eq!(ranges(&gaps), vec![(5, 10), (12, 20)]);
        assert!(complement(&[FrameRange::new(0, 20)], 20).is_empty());
    }
}
