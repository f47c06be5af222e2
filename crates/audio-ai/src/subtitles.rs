//! Subtitle generation in SRT and VTT formats.

use std::path::Path;

use crate::transcription::TranscriptionSegment;
use jumpcut_common::error::{JumpcutError, JumpcutResult};

/// Subtitle file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    Vtt,
}

impl SubtitleFormat {
    /// Parse a format name (`"srt"` or `"vtt"`, any case).
    pub fn from_name(name: &str) -> JumpcutResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "srt" => Ok(Self::Srt),
            "vtt" | "webvtt" => Ok(Self::Vtt),
            other => Err(JumpcutError::unsupported(format!(
                "subtitle format {other:?} (expected srt or vtt)"
            ))),
        }
    }

    /// Format implied by a file extension, defaulting to SRT.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("vtt") => Self::Vtt,
            _ => Self::Srt,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::Vtt => "vtt",
        }
    }

    pub fn render(&self, segments: &[TranscriptionSegment]) -> String {
        match self {
            Self::Srt => generate_srt(segments),
            Self::Vtt => generate_vtt(segments),
        }
    }
}

/// Generate SRT subtitle content from transcription segments.
pub fn generate_srt(segments: &[TranscriptionSegment]) -> String {
    let mut output = String::new();

    for (i, segment) in segments.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(segment.start_secs),
            format_srt_time(segment.end_secs),
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Generate WebVTT subtitle content from transcription segments.
pub fn generate_vtt(segments: &[TranscriptionSegment]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for segment in segments {
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_time(segment.start_secs),
            format_vtt_time(segment.end_secs),
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Format seconds as SRT timestamp: HH:MM:SS,mmm
fn format_srt_time(secs: f64) -> String {
    format_timestamp(secs, ',')
}

/// Format seconds as VTT timestamp: HH:MM:SS.mmm
fn format_vtt_time(secs: f64) -> String {
    format_timestamp(secs, '.')
}

/// Rounded to the nearest millisecond; frame times like 1001/30000s are
/// not whole milliseconds.
fn format_timestamp(secs: f64, separator: char) -> String {
    let total_ms = (secs.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{millis:03}")
}

/// Save subtitles to a file, choosing the format from its extension.
pub fn save_subtitles(segments: &[TranscriptionSegment], path: &Path) -> JumpcutResult<()> {
    let content = SubtitleFormat::from_path(path).render(segments);
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), cues = segments.len(), "Wrote subtitles");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srt_generation() {
        let segments = vec![
            TranscriptionSegment {
                start_secs: 0.0,
                end_secs: 2.5,
                text: "Hello world".to_string(),
            },
            TranscriptionSegment {
                start_secs: 3.0,
                end_secs: 5.0,
                text: "This is a test".to_string(),
            },
        ];

        let srt = generate_srt(&segments);
        assert!(srt.contains("1\n00:00:00,000 --> 00:00:02,500\nHello world"));
        assert!(srt.contains("2\n00:00:03,000 --> 00:00:05,000\nThis is a test"));
    }

    #[test]
    fn test_vtt_generation() {
        let segments = vec![TranscriptionSegment {
            start_secs: 61.5,
            end_secs: 63.0,
            text: "One minute in".to_string(),
        }];

        let vtt = generate_vtt(&segments);
        assert!(vtt.starts_with("WEBVTT\n"));
        assert!(vtt.contains("00:01:01.500 --> 00:01:03.000"));
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(format_srt_time(0.0), "00:00:00,000");
        assert_eq!(format_srt_time(3661.5), "01:01:01,500");
        assert_eq!(format_vtt_time(3661.5), "01:01:01.500");
        // two frames at 29.97 fps is 66.73ms
        assert_eq!(format_srt_time(2.0 * 1001.0 / 30000.0), "00:00:00,067");
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(SubtitleFormat::from_name("VTT").unwrap(), SubtitleFormat::Vtt);
        assert!(SubtitleFormat::from_name("ass").is_err());
        assert_eq!(SubtitleFormat::from_path(Path::new("out.vtt")), SubtitleFormat::Vtt);
        assert_eq!(SubtitleFormat::from_path(Path::new("out.txt")), SubtitleFormat::Srt);
    }
}
