//! Application configuration.
//!
//! Defaults live here and only here. Processing components receive an
//! explicit policy value built from this configuration by the caller.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{JumpcutError, JumpcutResult};

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default silence-cut policy.
    pub cut: CutDefaults,

    /// Default export settings.
    pub export: ExportDefaults,

    /// Bad-take heuristics for transcript review.
    pub takes: TakeDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default silence-cut parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutDefaults {
    /// Silences shorter than this (seconds) are left in place.
    pub min_silence_secs: f64,

    /// Frames retained on each side of a removed silence.
    pub padding_frames: u32,

    /// Keep segments shorter than this (seconds) are dropped.
    pub min_keep_secs: f64,

    /// Silences separated by a gap of at most this many frames are merged.
    pub merge_tolerance_frames: u32,
}

/// Default settings for the interchange document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportDefaults {
    /// Name of the event that holds the generated project.
    pub event_name: String,

    /// Suffix appended to the media stem to name the project.
    pub project_suffix: String,

    /// Subtitle format for re-projected cues ("srt" or "vtt").
    pub subtitle_format: String,

    /// Whether re-projected cues are also written into the project as
    /// connected captions.
    pub embed_captions: bool,
}

/// Bad-take heuristic parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeDefaults {
    /// Filler words and phrases, matched case-insensitively on word
    /// boundaries.
    pub filler_words: Vec<String>,

    /// A segment containing this many distinct fillers is a bad take.
    pub max_fillers: usize,

    /// Share of a segment's words also found in the previous segment above
    /// which it counts as a repeat.
    pub repeat_overlap: f64,

    /// Repeats are only flagged for segments with more words than this.
    pub repeat_min_words: usize,

    /// Segments with fewer words than this and shorter than
    /// `fragment_max_secs` are fragments.
    pub fragment_max_words: usize,

    pub fragment_max_secs: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "jumpcut=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cut: CutDefaults::default(),
            export: ExportDefaults::default(),
            takes: TakeDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CutDefaults {
    fn default() -> Self {
        Self {
            min_silence_secs: 0.5,
            padding_frames: 2,
            min_keep_secs: 0.1,
            merge_tolerance_frames: 1,
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            event_name: "Jumpcut".to_string(),
            project_suffix: " (cut)".to_string(),
            subtitle_format: "srt".to_string(),
            embed_captions: true,
        }
    }
}

impl Default for TakeDefaults {
    fn default() -> Self {
        Self {
            filler_words: ["um", "uh", "er", "ah", "you know", "i mean", "sort of", "kind of"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_fillers: 2,
            repeat_overlap: 0.7,
            repeat_min_words: 3,
            fragment_max_words: 3,
            fragment_max_secs: 1.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl CutDefaults {
    /// Reject values no cut policy can be built from.
    pub fn validate(&self) -> JumpcutResult<()> {
        for (name, value) in [
            ("min_silence_secs", self.min_silence_secs),
            ("min_keep_secs", self.min_keep_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(JumpcutError::config(format!(
                    "{name} must be a non-negative number of seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl TakeDefaults {
    /// Reject ratios outside `[0, 1]`, bad durations and blank fillers.
    pub fn validate(&self) -> JumpcutResult<()> {
        if !(0.0..=1.0).contains(&self.repeat_overlap) {
            return Err(JumpcutError::config(format!(
                "repeat_overlap must be between 0 and 1, got {}",
                self.repeat_overlap
            )));
        }
        if !self.fragment_max_secs.is_finite() || self.fragment_max_secs < 0.0 {
            return Err(JumpcutError::config(format!(
                "fragment_max_secs must be a non-negative number of seconds, got {}",
                self.fragment_max_secs
            )));
        }
        if self.filler_words.iter().any(|w| w.trim().is_empty()) {
            return Err(JumpcutError::config("filler_words must not contain blank entries"));
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load and validate config from an explicit path.
    pub fn load_from(path: &Path) -> JumpcutResult<Self> {
        if !path.exists() {
            return Err(JumpcutError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.cut.validate()?;
        config.takes.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> JumpcutResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> JumpcutResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("jumpcut").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"cut": {"padding_frames": 0}}"#).unwrap();
        assert_eq!(config.cut.padding_frames, 0);
        assert!((config.cut.min_silence_secs - 0.5).abs() < 1e-9);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.export.subtitle_format, "srt");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("jumpcut_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("config.json");

        let mut config = AppConfig::default();
        config.cut.min_keep_secs = 0.25;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let cut = CutDefaults {
            min_silence_secs: -1.0,
            ..Default::default()
        };
        assert!(matches!(cut.validate(), Err(JumpcutError::Config { .. })));
    }

    #[test]
    fn test_take_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"takes": {"filler_words": ["ну", "как бы"]}}"#).unwrap();
        assert_eq!(config.takes.filler_words, vec!["ну", "как бы"]);
        assert_eq!(config.takes.max_fillers, 2);
        assert!(config.export.embed_captions);
        assert!(config.takes.validate().is_ok());

        let bad = TakeDefaults {
            repeat_overlap: 1.5,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(JumpcutError::Config { .. })));

        let blank = TakeDefaults {
            filler_words: vec![" ".to_string()],
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("jumpcut_no_such_config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(JumpcutError::FileNotFound { .. })
        ));
    }
}
