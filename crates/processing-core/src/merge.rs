//! Silence interval merging.
//!
//! Analysis passes report silences in whatever order they find them, often
//! overlapping when audio was scanned in chunks. Merging produces the minimal
//! disjoint, ascending set. Union is associative and commutative, so partial
//! lists can simply be concatenated and merged once.

use jumpcut_project_model::{FrameRate, ModelError, RawInterval, SilenceInterval, Timecode};

use crate::error::CutResult;

/// Coalesces overlapping and near-adjacent silence intervals.
#[derive(Debug, Clone)]
pub struct SilenceMerger {
    /// Intervals separated by a gap of at most this many frames are joined.
    tolerance_frames: i64,
}

impl SilenceMerger {
    pub fn new(tolerance_frames: u32) -> Self {
        Self {
            tolerance_frames: tolerance_frames as i64,
        }
    }

    /// Round raw second pairs onto the frame grid.
    pub fn ingest(raw: &[RawInterval], rate: FrameRate) -> CutResult<Vec<SilenceInterval>> {
        raw.iter()
            .map(|r| SilenceInterval::from_raw(*r, rate).map_err(Into::into))
            .collect()
    }

    /// Ingest and merge in one step.
    pub fn merge_raw(&self, raw: &[RawInterval], rate: FrameRate) -> CutResult<Vec<SilenceInterval>> {
        let intervals = Self::ingest(raw, rate)?;
        self.merge(&intervals)
    }

    /// Merge intervals into a disjoint ascending set.
    ///
    /// The output has no two intervals separated by `tolerance_frames` or
    /// fewer frames.
    pub fn merge(&self, intervals: &[SilenceInterval]) -> CutResult<Vec<SilenceInterval>> {
        let Some(first) = intervals.first() else {
            return Ok(vec![]);
        };
        let rate = first.rate();
        if let Some(other) = intervals.iter().find(|i| i.rate() != rate) {
            return Err(ModelError::RateMismatch {
                left: rate,
                right: other.rate(),
            }
            .into());
        }

        let mut ranges: Vec<_> = intervals.iter().map(SilenceInterval::range).collect();
        ranges.sort_by_key(|r| (r.start, r.end));

        let mut merged = Vec::with_capacity(ranges.len());
        let mut current = ranges[0];
        for next in ranges.into_iter().skip(1) {
            if next.start <= current.end + self.tolerance_frames {
                current.end = current.end.max(next.end);
            } else {
                merged.push(current);
                current = next;
            }
        }
        merged.push(current);

        tracing::debug!(
            input = intervals.len(),
            output = merged.len(),
            tolerance_frames = self.tolerance_frames,
            "Merged silence intervals"
        );

        merged
            .into_iter()
            .map(|r| {
                SilenceInterval::new(Timecode::new(r.start, rate), Timecode::new(r.end, rate))
                    .map_err(Into::into)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: FrameRate = FrameRate::FPS_24;

    fn silence(start: i64, end: i64) -> SilenceInterval {
        SilenceInterval::new(Timecode::new(start, RATE), Timecode::new(end, RATE)).unwrap()
    }

    fn frames(intervals: &[SilenceInterval]) -> Vec<(i64, i64)> {
        intervals
            .iter()
            .map(|i| (i.start().frames(), i.end().frames()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let merged = SilenceMerger::new(1).merge(&[]).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_overlapping_and_unordered() {
        let merged = SilenceMerger::new(0)
            .merge(&[silence(50, 60), silence(10, 20), silence(15, 30), silence(30, 35)])
            .unwrap();
        assert_eq!(frames(&merged), vec![(10, 35), (50, 60)]);
    }

    #[test]
    fn test_contained_interval() {
        let merged = SilenceMerger::new(0)
            .merge(&[silence(10, 100), silence(20, 30)])
            .unwrap();
        assert_eq!(frames(&merged), vec![(10, 100)]);
    }

    #[test]
    fn test_tolerance_joins_small_gaps() {
        let input = [silence(10, 20), silence(21, 30), silence(33, 40)];
        assert_eq!(
            frames(&SilenceMerger::new(0).merge(&input).unwrap()),
            vec![(10, 20), (21, 30), (33, 40)]
        );
        assert_eq!(
            frames(&SilenceMerger::new(1).merge(&input).unwrap()),
            vec![(10, 30), (33, 40)]
        );
        assert_eq!(
            frames(&SilenceMerger::new(3).merge(&input).unwrap()),
            vec![(10, 40)]
        );
    }

    #[test]
    fn test_sub_frame_gap_merges_after_rounding() {
        // 2.00s and 2.02s land on the same frame at 24 fps.
        let raw = [RawInterval::new(1.0, 2.0), RawInterval::new(2.02, 3.0)];
        let merged = SilenceMerger::new(0).merge_raw(&raw, RATE).unwrap();
        assert_eq!(frames(&merged), vec![(24, 72)]);
    }

    #[test]
    fn test_malformed_raw_interval() {
        let raw = [RawInterval::new(1.0, 2.0), RawInterval::new(3.0, 3.0)];
        assert!(SilenceMerger::new(0).merge_raw(&raw, RATE).is_err());
    }

    #[test]
    fn test_mixed_rates_rejected() {
        let other = SilenceInterval::new(
            Timecode::new(0, FrameRate::FPS_25),
            Timecode::new(5, FrameRate::FPS_25),
        )
        .unwrap();
        assert!(SilenceMerger::new(0).merge(&[silence(0, 5), other]).is_err());
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = [silence(0, 10), silence(40, 50)];
        let b = [silence(8, 20), silence(45, 60)];
        let merger = SilenceMerger::new(0);

        let all: Vec<_> = a.iter().chain(b.iter()).copied().collect();
        let mut reversed = all.clone();
        reversed.reverse();

        let staged: Vec<_> = merger
            .merge(&a)
            .unwrap()
            .into_iter()
            .chain(merger.merge(&b).unwrap())
            .collect();

        let expected = merger.merge(&all).unwrap();
        assert_eq!(merger.merge(&reversed).unwrap(), expected);
        assert_eq!(merger.merge(&staged).unwrap(), expected);
        assert_eq!(frames(&expected), vec![(0, 20), (40, 60)]);
    }
}
