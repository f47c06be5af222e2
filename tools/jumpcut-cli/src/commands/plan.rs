//! Show the cut for a recording without writing anything.

use std::path::Path;

use anyhow::Context;
use jumpcut_audio_ai::{analyze_takes, Take, TakeRules, TakeSummary, Transcript};
use jumpcut_common::config::AppConfig;
use jumpcut_processing_core::CutReport;
use jumpcut_project_model::Timecode;
use serde::Serialize;

use super::{run_cut, CutArgs};

/// Bad-take review of a transcript, in source time.
#[derive(Debug, Serialize)]
pub struct TakeReview {
    pub summary: TakeSummary,
    pub takes: Vec<Take>,
}

#[derive(Serialize)]
struct PlanJson<'a> {
    #[serde(flatten)]
    report: &'a CutReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    takes: Option<&'a TakeReview>,
}

/// Run the configured bad-take heuristics over a transcript file.
pub fn review_takes(config: &AppConfig, path: &Path) -> anyhow::Result<TakeReview> {
    let rules = TakeRules::new(&config.takes).context("Invalid take settings")?;
    let transcript = Transcript::load(path)
        .with_context(|| format!("Failed to load transcript {}", path.display()))?;
    let takes = analyze_takes(&transcript.segments, &rules);
    Ok(TakeReview {
        summary: TakeSummary::from_takes(&takes),
        takes,
    })
}

pub fn run(
    config: &AppConfig,
    args: CutArgs,
    json: bool,
    transcript: Option<&Path>,
) -> anyhow::Result<()> {
    let (media, report) = run_cut(config, &args)?;
    let review = transcript
        .map(|path| review_takes(config, path))
        .transpose()?;

    if json {
        let out = PlanJson {
            report: &report,
            takes: review.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let rate = report.plan.rate();
    let stats = &report.stats;

    println!("Media: {}", media.display_name());
    println!("  Frame rate: {rate} ({:.3} fps)", rate.fps());
    println!(
        "  Duration: {} ({:.3}s)",
        report.plan.duration(),
        stats.original_secs
    );
    println!();

    println!(
        "Silences: {} detected, {} after merging, {} cut",
        stats.silences_detected, stats.silences_merged, stats.cuts
    );
    for range in report.plan.removed() {
        let (start, end) = range.to_seconds(rate);
        println!(
            "  - {} to {}  ({:.3}s)",
            Timecode::new(range.start, rate),
            Timecode::new(range.end, rate),
            end - start
        );
    }
    println!();

    println!("Keep segments:");
    for (i, segment) in report.timeline.segments().iter().enumerate() {
        println!(
            "  {:>3}  {} to {}  ({:.3}s)  at {}",
            i + 1,
            segment.source_start(),
            segment.source_end(),
            segment.duration().to_seconds(),
            segment.timeline_start()
        );
    }
    println!();

    let percent = if stats.original_secs > 0.0 {
        stats.kept_secs / stats.original_secs * 100.0
    } else {
        0.0
    };
    println!(
        "Result: {} ({:.3}s, {percent:.1}% of original, {:.3}s removed)",
        report.timeline.duration(),
        stats.kept_secs,
        stats.removed_secs
    );

    if let Some(review) = &review {
        println!();
        print_takes(review);
    }

    Ok(())
}

fn print_takes(review: &TakeReview) {
    let summary = &review.summary;
    println!(
        "Takes: {} reviewed, {} good ({:.3}s), {} bad ({:.3}s)",
        summary.total, summary.good, summary.good_secs, summary.bad, summary.bad_secs
    );
    for take in review.takes.iter().filter(|t| !t.is_good()) {
        let reason = take
            .issue
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        println!(
            "  - {:.3}s to {:.3}s  {reason} (confidence {:.1}): {}",
            take.start_secs,
            take.end_secs,
            take.confidence(),
            excerpt(&take.text, 50)
        );
    }
}

/// At most `max_chars` characters of `text`, with an ellipsis when cut.
fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max_chars).collect();
    short.push_str("...");
    short
}
