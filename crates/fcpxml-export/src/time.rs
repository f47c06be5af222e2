//! FCPXML time notation.
//!
//! FCPXML writes times as seconds with an `s` suffix, either whole (`"4s"`)
//! or as an integer fraction (`"1001/30000s"`). A timecode at `num/den` fps
//! is `frames * den / num` seconds, so writing that fraction unreduced keeps
//! the frame count visible and exact.

use jumpcut_project_model::Timecode;

/// Format a timecode as an FCPXML time value.
pub fn format_time(t: Timecode) -> String {
    let (numer, denom) = t.rational_seconds();
    if numer % denom == 0 {
        format!("{}s", numer / denom)
    } else {
        format!("{numer}/{denom}s")
    }
}

/// Parse an FCPXML time value into `(numerator, denominator)` seconds.
///
/// Returns `None` for anything that is not `"<int>s"` or `"<int>/<int>s"`
/// with a positive denominator.
pub fn parse_time(value: &str) -> Option<(i64, i64)> {
    let body = value.strip_suffix('s')?;
    match body.split_once('/') {
        Some((numer, denom)) => {
            let denom: i64 = denom.parse().ok()?;
            if denom <= 0 {
                return None;
            }
            Some((numer.parse().ok()?, denom))
        }
        None => Some((body.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jumpcut_project_model::FrameRate;

    #[test]
    fn test_whole_seconds() {
        assert_eq!(format_time(Timecode::new(0, FrameRate::FPS_25)), "0s");
        assert_eq!(format_time(Timecode::new(100, FrameRate::FPS_25)), "4s");
        assert_eq!(format_time(Timecode::new(30_000, FrameRate::FPS_29_97)), "1001s");
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(format_time(Timecode::new(1, FrameRate::FPS_23_976)), "1001/24000s");
        assert_eq!(format_time(Timecode::new(72, FrameRate::FPS_23_976)), "72072/24000s");
        assert_eq!(format_time(Timecode::new(30, FrameRate::FPS_25)), "30/25s");
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("0s"), Some((0, 1)));
        assert_eq!(parse_time("1001/24000s"), Some((1001, 24000)));
        assert_eq!(parse_time("1.5s"), None);
        assert_eq!(parse_time("10/0s"), None);
        assert_eq!(parse_time("10/25"), None);
    }
}
