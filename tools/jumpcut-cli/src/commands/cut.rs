//! Cut a recording and write the FCPXML project.

use std::path::PathBuf;

use anyhow::Context;
use jumpcut_audio_ai::{
    reproject_captions, save_subtitles, SubtitleFormat, Transcript, TranscriptionSegment,
};
use jumpcut_common::config::AppConfig;
use jumpcut_fcpxml_export::render_fcpxml;
use jumpcut_processing_core::CutReport;
use jumpcut_project_model::{Asset, CaptionTrack, MediaInfo, Project};

use super::{run_cut, CutArgs};

/// Caption language when the transcript does not report one.
const DEFAULT_CAPTION_LANGUAGE: &str = "en";

/// Where and how to write the results.
pub struct OutputArgs {
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub event: Option<String>,
    pub subtitles: Option<PathBuf>,
    pub subtitle_format: Option<String>,
}

/// Everything `cut` writes, fully rendered before any file is touched.
pub struct CutOutputs {
    pub fcpxml_path: PathBuf,
    pub fcpxml: String,
    pub segments: usize,
    pub subtitles: Option<SubtitleOutput>,
}

/// Re-timed cues and the side-car file they go to.
pub struct SubtitleOutput {
    pub path: PathBuf,
    pub cues: Vec<TranscriptionSegment>,
    pub source_cues: usize,
    pub embedded: bool,
}

impl CutOutputs {
    pub fn write(&self) -> anyhow::Result<()> {
        std::fs::write(&self.fcpxml_path, &self.fcpxml)
            .with_context(|| format!("Failed to write {}", self.fcpxml_path.display()))?;
        if let Some(subtitles) = &self.subtitles {
            save_subtitles(&subtitles.cues, &subtitles.path)
                .with_context(|| format!("Failed to write {}", subtitles.path.display()))?;
        }
        Ok(())
    }
}

pub fn run(config: &AppConfig, args: CutArgs, out: OutputArgs) -> anyhow::Result<()> {
    let (media, report) = run_cut(config, &args)?;
    let stats = report.stats.clone();

    let outputs = prepare(config, &media, report, out)?;
    outputs.write()?;

    println!("Wrote {}", outputs.fcpxml_path.display());
    println!(
        "  {} segments, {:.3}s kept of {:.3}s",
        outputs.segments, stats.kept_secs, stats.original_secs
    );
    if let Some(subtitles) = &outputs.subtitles {
        println!(
            "Wrote {} ({} of {} cues{})",
            subtitles.path.display(),
            subtitles.cues.len(),
            subtitles.source_cues,
            if subtitles.embedded { ", also embedded as captions" } else { "" }
        );
    }

    Ok(())
}

/// Build the project and every output document without writing anything,
/// so a bad transcript or subtitle format leaves no partial results behind.
pub fn prepare(
    config: &AppConfig,
    media: &MediaInfo,
    report: CutReport,
    out: OutputArgs,
) -> anyhow::Result<CutOutputs> {
    let name = out
        .name
        .unwrap_or_else(|| format!("{}{}", media.stem(), config.export.project_suffix));
    let event = out
        .event
        .unwrap_or_else(|| config.export.event_name.clone());
    let fcpxml_path = out.output.unwrap_or_else(|| default_output(media, &name));

    let transcript = match &out.subtitles {
        Some(path) => {
            let format_name = out
                .subtitle_format
                .as_deref()
                .unwrap_or(&config.export.subtitle_format);
            let format = SubtitleFormat::from_name(format_name)?;
            let transcript = Transcript::load(path)
                .with_context(|| format!("Failed to load transcript {}", path.display()))?;
            Some((format, transcript))
        }
        None => None,
    };

    let asset = Asset::from_media(media).context("Invalid media")?;
    let mut project = Project::new(name, event, asset, report.timeline)
        .context("Failed to assemble project")?
        .with_modified_at(chrono::Utc::now());

    let mut subtitles = None;
    if let Some((format, transcript)) = transcript {
        let captions = reproject_captions(&transcript.segments, project.timeline())
            .context("Failed to re-time transcript")?;
        let cues: Vec<TranscriptionSegment> =
            captions.iter().map(TranscriptionSegment::from).collect();

        let embedded = config.export.embed_captions && !captions.is_empty();
        if embedded {
            let language = transcript
                .language
                .as_deref()
                .unwrap_or(DEFAULT_CAPTION_LANGUAGE);
            let track = CaptionTrack::new(language, captions).context("Invalid caption track")?;
            project = project
                .with_captions(track)
                .context("Failed to attach captions")?;
        }

        subtitles = Some(SubtitleOutput {
            path: fcpxml_path.with_extension(format.extension()),
            cues,
            source_cues: transcript.segments.len(),
            embedded,
        });
    }

    let fcpxml = render_fcpxml(&project).context("Failed to render FCPXML")?;

    Ok(CutOutputs {
        fcpxml_path,
        fcpxml,
        segments: project.timeline().segments().len(),
        subtitles,
    })
}

/// `<project name>.fcpxml` in the current directory.
fn default_output(media: &MediaInfo, name: &str) -> PathBuf {
    let file = sanitize_file_name(name);
    let file = if file.is_empty() { media.stem() } else { file };
    PathBuf::from(format!("{file}.fcpxml"))
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
