//! Frame rates and audio settings FCPXML can describe.

use jumpcut_project_model::FrameRate;

use crate::error::{ExportError, ExportResult};

/// Rates Final Cut Pro accepts, with the code used in format names.
const SUPPORTED_RATES: [(FrameRate, &str); 9] = [
    (FrameRate::FPS_23_976, "2398"),
    (FrameRate::FPS_24, "24"),
    (FrameRate::FPS_25, "25"),
    (FrameRate::FPS_29_97, "2997"),
    (FrameRate::FPS_30, "30"),
    (FrameRate::FPS_48, "48"),
    (FrameRate::FPS_50, "50"),
    (FrameRate::FPS_59_94, "5994"),
    (FrameRate::FPS_60, "60"),
];

/// Rate code for a supported frame rate, e.g. `"2997"` for 30000/1001.
pub fn rate_code(rate: FrameRate) -> ExportResult<&'static str> {
    SUPPORTED_RATES
        .iter()
        .find(|(r, _)| *r == rate)
        .map(|(_, code)| *code)
        .ok_or(ExportError::UnsupportedFrameRate { rate })
}

/// `FFVideoFormat` name for a frame height and rate, e.g. `FFVideoFormat1080p2398`.
pub fn video_format_name(height: u32, rate: FrameRate) -> ExportResult<String> {
    Ok(format!("FFVideoFormat{height}p{}", rate_code(rate)?))
}

/// Sequence audio layout for a channel count.
pub fn audio_layout(channels: u32) -> &'static str {
    match channels {
        0 | 1 => "mono",
        2 => "stereo",
        _ => "surround",
    }
}

/// Sample rate as an FCPXML rate token: `48000` -> `48k`, `44100` -> `44.1k`.
pub fn audio_rate_token(hz: u32) -> String {
    if hz % 1000 == 0 {
        format!("{}k", hz / 1000)
    } else {
        let tenths = (hz + 50) / 100;
        format!("{}.{}k", tenths / 10, tenths % 10)
    }
}
