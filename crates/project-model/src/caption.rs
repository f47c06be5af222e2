//! Captions placed on the edited timeline.
//!
//! Caption times are timeline times, not source times: a transcript is
//! re-projected through the [`Timeline`](crate::timeline::Timeline) before
//! it becomes a [`CaptionTrack`].

use serde::Serialize;

use crate::error::{ModelError, ModelResult};
use crate::timecode::Timecode;

/// One caption, frame-aligned on the edited timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Caption {
    start: Timecode,
    end: Timecode,
    text: String,
}

impl Caption {
    /// Create a caption covering `[start, end)` with trimmed `text`.
    pub fn new(start: Timecode, end: Timecode, text: impl AsRef<str>) -> ModelResult<Self> {
        start.ensure_same_rate(&end)?;
        let text = text.as_ref().trim();
        if start.frames() < 0 || end.frames() <= start.frames() {
            return Err(ModelError::InvalidCaption {
                message: format!(
                    "caption [{}, {}) is empty or negative",
                    start.frames(),
                    end.frames()
                ),
            });
        }
        if text.is_empty() {
            return Err(ModelError::InvalidCaption {
                message: format!("caption at frame {} has no text", start.frames()),
            });
        }
        Ok(Self {
            start,
            end,
            text: text.to_string(),
        })
    }

    pub fn start(&self) -> Timecode {
        self.start
    }

    pub fn end(&self) -> Timecode {
        self.end
    }

    pub fn duration(&self) -> Timecode {
        Timecode::new(self.end.frames() - self.start.frames(), self.start.rate())
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Captions in one language, in timeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionTrack {
    language: String,
    captions: Vec<Caption>,
}

impl CaptionTrack {
    /// Build a track; `language` is a BCP 47 style tag such as `en` or `pt-BR`.
    pub fn new(language: impl Into<String>, mut captions: Vec<Caption>) -> ModelResult<Self> {
        let language = language.into();
        let valid_tag = !language.is_empty()
            && language
                .split('-')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !valid_tag {
            return Err(ModelError::InvalidCaption {
                message: format!("invalid caption language tag {language:?}"),
            });
        }
        captions.sort_by_key(|c| c.start.frames());
        Ok(Self { language, captions })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn captions(&self) -> &[Caption] {
        &self.captions
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}
