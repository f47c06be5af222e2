use std::path::PathBuf;

use jumpcut_audio_ai::{generate_srt, load_silences, reproject_segments, Transcript};
use jumpcut_processing_core::{CutPolicy, CutReport, SilenceCutter};
use jumpcut_project_model::{MediaInfo, Timecode};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-job")
        .join(name)
}

fn cut(media: &MediaInfo, silences_file: &str) -> CutReport {
    let silences = load_silences(&fixture(silences_file), Some(media.duration_secs)).unwrap();
    SilenceCutter::new(CutPolicy {
        min_silence_secs: 0.5,
        padding_frames: 2,
        min_keep_secs: 0.1,
        merge_tolerance_frames: 1,
    })
    .unwrap()
    .cut_media(media, &silences)
    .unwrap()
}

#[test]
fn silencedetect_log_matches_json_list() {
    let media = MediaInfo::load(fixture("media.json")).unwrap();
    let from_log = cut(&media, "silencedetect.log");
    let from_json = cut(&media, "silences.json");

    assert_eq!(from_log.stats.silences_detected, 4);
    assert_eq!(from_log.plan.keeps(), from_json.plan.keeps());
    assert_eq!(from_log.timeline, from_json.timeline);
}

#[test]
fn transcript_follows_the_cut() {
    let media = MediaInfo::load(fixture("media.json")).unwrap();
    let report = cut(&media, "silences.json");
    let transcript = Transcript::load(&fixture("whisper.json")).unwrap();
    assert_eq!(transcript.segments.len(), 5);

    let cues = reproject_segments(&transcript.segments, &report.timeline).unwrap();
    let texts: Vec<_> = cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Thanks for having me.",
            "So the idea started in a garage.",
            "We had no money at all.",
            "And that is where it stops.",
        ]
    );

    let rate = media.frame_rate;
    // first cue starts 1.3s into the source, 34 frames are cut before it
    assert_eq!(cues[0].start_secs, Timecode::new(5, rate).to_seconds());
    assert_eq!(cues[3].start_secs, Timecode::new(446, rate).to_seconds());
    assert!(cues.windows(2).all(|w| w[0].end_secs <= w[1].start_secs));

    let srt = generate_srt(&cues);
    assert!(srt.starts_with("1\n00:00:00,167 --> 00:00:03,270\nThanks for having me.\n"));
}
