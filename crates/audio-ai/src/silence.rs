//! Silence intervals reported by the audio analysis pass.
//!
//! Two input shapes are accepted:
//! - a JSON array of `{"start": s, "end": e}` objects or `[s, e]` pairs
//! - the stderr log of ffmpeg's `silencedetect` filter

use std::path::Path;

use jumpcut_common::error::{JumpcutError, JumpcutResult};
use jumpcut_project_model::RawInterval;
use serde::Deserialize;

const START_MARKER: &str = "silence_start:";
const END_MARKER: &str = "silence_end:";

#[derive(Deserialize)]
#[serde(untagged)]
enum SilenceEntry {
    Pair(f64, f64),
    Object(RawInterval),
}

impl From<SilenceEntry> for RawInterval {
    fn from(entry: SilenceEntry) -> Self {
        match entry {
            SilenceEntry::Pair(start, end) => RawInterval::new(start, end),
            SilenceEntry::Object(raw) => raw,
        }
    }
}

/// Parse a JSON silence list.
pub fn parse_silence_json(json: &str) -> JumpcutResult<Vec<RawInterval>> {
    let entries: Vec<SilenceEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(RawInterval::from).collect())
}

/// Parse an ffmpeg `silencedetect` log.
///
/// A `silence_start` still open at the end of the log (silence running to
/// the end of the file) is closed at `media_duration_secs` when it is known
/// and dropped otherwise. A slightly negative start, which ffmpeg can
/// report for leading silence, is clamped to zero.
pub fn parse_silencedetect(
    log: &str,
    media_duration_secs: Option<f64>,
) -> JumpcutResult<Vec<RawInterval>> {
    let mut intervals = Vec::new();
    let mut open: Option<f64> = None;

    for (index, line) in log.lines().enumerate() {
        let line_no = index + 1;
        if let Some(value) = marker_value(line, START_MARKER) {
            let start = parse_secs(value, line_no)?.max(0.0);
            if let Some(previous) = open.replace(start) {
                tracing::warn!(line = line_no, previous, "silence_start without matching end");
            }
        } else if let Some(value) = marker_value(line, END_MARKER) {
            let end = parse_secs(value, line_no)?;
            match open.take() {
                Some(start) => intervals.push(RawInterval::new(start, end)),
                None => tracing::warn!(line = line_no, end, "silence_end without matching start"),
            }
        }
    }

    if let Some(start) = open {
        match media_duration_secs {
            Some(end) if end > start => intervals.push(RawInterval::new(start, end)),
            Some(_) => {}
            None => tracing::warn!(start, "Dropping trailing silence: media duration unknown"),
        }
    }

    tracing::debug!(count = intervals.len(), "Parsed silencedetect log");
    Ok(intervals)
}

/// Parse silence text in either supported shape.
pub fn parse_silences(text: &str, media_duration_secs: Option<f64>) -> JumpcutResult<Vec<RawInterval>> {
    if text.trim_start().starts_with('[') {
        parse_silence_json(text)
    } else {
        parse_silencedetect(text, media_duration_secs)
    }
}

/// Read silences from a file in either supported shape.
pub fn load_silences(path: &Path, media_duration_secs: Option<f64>) -> JumpcutResult<Vec<RawInterval>> {
    if !path.exists() {
        return Err(JumpcutError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    let intervals = parse_silences(&text, media_duration_secs)?;
    tracing::info!(path = %path.display(), count = intervals.len(), "Loaded silence intervals");
    Ok(intervals)
}

/// The number following `marker` on a log line.
fn marker_value<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = line.split_once(marker)?;
    rest.split(|c: char| c.is_whitespace() || c == '|')
        .find(|s| !s.is_empty())
}

fn parse_secs(value: &str, line_no: usize) -> JumpcutResult<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| JumpcutError::parse(format!("line {line_no}: invalid seconds value {value:?}")))
}
