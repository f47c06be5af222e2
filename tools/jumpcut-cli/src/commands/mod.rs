//! Subcommand implementations.

pub mod config;
pub mod cut;
pub mod plan;

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use jumpcut_audio_ai::load_silences;
use jumpcut_common::config::{AppConfig, CutDefaults};
use jumpcut_processing_core::{CutPolicy, CutReport, SilenceCutter};
use jumpcut_project_model::MediaInfo;

/// Inputs and policy overrides shared by `plan` and `cut`.
#[derive(Args)]
pub struct CutArgs {
    /// Media metadata JSON for the recording
    pub media: PathBuf,

    /// Silence intervals: JSON list or ffmpeg silencedetect log
    pub silences: PathBuf,

    /// Minimum silence length to remove (seconds)
    #[arg(long)]
    pub min_silence: Option<f64>,

    /// Frames kept on each side of a removed silence
    #[arg(long)]
    pub padding: Option<u32>,

    /// Minimum length of a kept segment (seconds)
    #[arg(long)]
    pub min_keep: Option<f64>,

    /// Merge silences at most this many frames apart
    #[arg(long)]
    pub merge_tolerance: Option<u32>,
}

impl CutArgs {
    /// Configured defaults with any flags applied on top.
    pub fn policy(&self, defaults: &CutDefaults) -> CutPolicy {
        CutPolicy {
            min_silence_secs: self.min_silence.unwrap_or(defaults.min_silence_secs),
            padding_frames: self.padding.unwrap_or(defaults.padding_frames),
            min_keep_secs: self.min_keep.unwrap_or(defaults.min_keep_secs),
            merge_tolerance_frames: self.merge_tolerance.unwrap_or(defaults.merge_tolerance_frames),
        }
    }
}

/// Load both inputs and run the cut.
pub fn run_cut(config: &AppConfig, args: &CutArgs) -> anyhow::Result<(MediaInfo, CutReport)> {
    let media = MediaInfo::load(&args.media)
        .with_context(|| format!("Failed to load media info from {}", args.media.display()))?;
    let silences = load_silences(&args.silences, Some(media.duration_secs))
        .with_context(|| format!("Failed to load silences from {}", args.silences.display()))?;

    let cutter = SilenceCutter::new(args.policy(&config.cut)).context("Invalid cut settings")?;
    let report = cutter
        .cut_media(&media, &silences)
        .with_context(|| format!("Failed to cut {}", media.display_name()))?;
    Ok((media, report))
}
