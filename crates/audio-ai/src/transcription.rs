//! Whisper transcripts and their re-projection onto a cut timeline.
//!
//! Transcription itself runs outside Jumpcut; this module reads the JSON
//! Whisper writes (`whisper --output_format json`) and moves each cue from
//! source time to edited-timeline time.

use std::path::Path;

use jumpcut_common::error::{JumpcutError, JumpcutResult};
use jumpcut_project_model::{Caption, Timeline};
use serde::{Deserialize, Serialize};

/// A single transcribed segment with timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    /// Start time in seconds.
    #[serde(alias = "start")]
    pub start_secs: f64,
    /// End time in seconds.
    #[serde(alias = "end")]
    pub end_secs: f64,
    /// Transcribed text.
    pub text: String,
}

/// A Whisper transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    /// Detected language, if reported.
    #[serde(default)]
    pub language: Option<String>,
    /// Timed segments in source order.
    #[serde(default)]
    pub segments: Vec<TranscriptionSegment>,
}

impl Transcript {
    /// Parse Whisper JSON text.
    pub fn parse(json: &str) -> JumpcutResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a Whisper JSON file.
    pub fn load(path: &Path) -> JumpcutResult<Self> {
        if !path.exists() {
            return Err(JumpcutError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let transcript = Self::parse(&std::fs::read_to_string(path)?)?;
        tracing::info!(
            path = %path.display(),
            segments = transcript.segments.len(),
            language = transcript.language.as_deref().unwrap_or("unknown"),
            "Loaded transcript"
        );
        Ok(transcript)
    }
}

/// Move cues from source time onto the edited timeline as captions.
///
/// Each boundary is rounded to a source frame and re-projected. Cues that
/// collapse to nothing, because they lay entirely inside removed material,
/// are dropped. Text is trimmed; blank cues are dropped too.
pub fn reproject_captions(
    segments: &[TranscriptionSegment],
    timeline: &Timeline,
) -> JumpcutResult<Vec<Caption>> {
    let mut captions = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        let start = timeline.reproject_seconds(segment.start_secs)?;
        let end = timeline.reproject_seconds(segment.end_secs)?;
        let text = segment.text.trim();

        if end.frames() <= start.frames() || text.is_empty() {
            tracing::debug!(
                index,
                start_secs = segment.start_secs,
                end_secs = segment.end_secs,
                "Dropping cue inside removed material"
            );
            continue;
        }

        captions.push(Caption::new(start, end, text)?);
    }

    Ok(captions)
}

/// Re-projected cues as timed segments in seconds, for subtitle files.
pub fn reproject_segments(
    segments: &[TranscriptionSegment],
    timeline: &Timeline,
) -> JumpcutResult<Vec<TranscriptionSegment>> {
    Ok(reproject_captions(segments, timeline)?
        .iter()
        .map(TranscriptionSegment::from)
        .collect())
}

impl From<&Caption> for TranscriptionSegment {
    fn from(caption: &Caption) -> Self {
        Self {
            start_secs: caption.start().to_seconds(),
            end_secs: caption.end().to_seconds(),
            text: caption.text().to_string(),
        }
    }
}
