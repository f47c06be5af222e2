//! Source media metadata and the asset built from it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::timecode::{FrameRate, Timecode};

/// Metadata about the source recording, as reported by a media inspection tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Absolute path to the media file.
    pub path: PathBuf,

    /// Duration in seconds.
    pub duration_secs: f64,

    /// Constant video frame rate.
    pub frame_rate: FrameRate,

    /// Frame size in pixels.
    pub width: u32,
    pub height: u32,

    #[serde(default = "default_true")]
    pub has_video: bool,

    #[serde(default = "default_true")]
    pub has_audio: bool,

    /// Audio sample rate in Hz.
    #[serde(default = "default_audio_sample_rate")]
    pub audio_sample_rate: u32,

    /// Number of audio channels.
    #[serde(default = "default_audio_channels")]
    pub audio_channels: u32,
}

fn default_true() -> bool {
    true
}

fn default_audio_sample_rate() -> u32 {
    48_000
}

fn default_audio_channels() -> u32 {
    2
}

impl MediaInfo {
    /// Load metadata from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ModelError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ModelError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Media duration floored to a whole frame, so a clip never reaches
    /// past the end of the file.
    pub fn duration(&self) -> ModelResult<Timecode> {
        if self.duration_secs < 0.0 {
            return Err(ModelError::InvalidProject {
                message: format!(
                    "{} has a negative duration ({}s)",
                    self.path.display(),
                    self.duration_secs
                ),
            });
        }
        Timecode::from_seconds_floor(self.duration_secs, self.frame_rate)
    }

    /// File name used to label the asset and its clips.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// File stem, used to derive project and output names.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }
}

/// The single media resource referenced by a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    path: PathBuf,
    name: String,
    duration: Timecode,
    width: u32,
    height: u32,
    has_video: bool,
    has_audio: bool,
    audio_sample_rate: u32,
    audio_channels: u32,
}

impl Asset {
    /// Build the asset for a described media file.
    pub fn from_media(media: &MediaInfo) -> ModelResult<Self> {
        if !media.has_video && !media.has_audio {
            return Err(ModelError::InvalidProject {
                message: format!("{} has neither video nor audio", media.path.display()),
            });
        }
        Ok(Self {
            path: media.path.clone(),
            name: media.display_name(),
            duration: media.duration()?,
            width: media.width,
            height: media.height,
            has_video: media.has_video,
            has_audio: media.has_audio,
            audio_sample_rate: media.audio_sample_rate,
            audio_channels: media.audio_channels,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Timecode {
        self.duration
    }

    pub fn frame_rate(&self) -> FrameRate {
        self.duration.rate()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn has_video(&self) -> bool {
        self.has_video
    }

    pub fn has_audio(&self) -> bool {
        self.has_audio
    }

    pub fn audio_sample_rate(&self) -> u32 {
        self.audio_sample_rate
    }

    pub fn audio_channels(&self) -> u32 {
        self.audio_channels
    }
}
