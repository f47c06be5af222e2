//! FCPXML document assembly.

use jumpcut_project_model::{Caption, KeepSegment, Project, Timecode};

use crate::error::ExportResult;
use crate::format::{audio_layout, audio_rate_token, video_format_name};
use crate::time::format_time;
use crate::url::file_url;
use crate::xml::XmlWriter;

/// FCPXML schema version written to the root element.
pub const FCPXML_VERSION: &str = "1.11";

const FORMAT_ID: &str = "r1";
const ASSET_ID: &str = "r2";

/// Lane for connected captions, above the primary storyline.
const CAPTION_LANE: &str = "1";

const CAPTION_TEXT_STYLE: [(&str, &str); 5] = [
    ("font", "Helvetica"),
    ("fontSize", "13"),
    ("fontFace", "Regular"),
    ("fontColor", "1 1 1 1"),
    ("backgroundColor", "0 0 0 1"),
];

/// A project checked for export, ready to render.
///
/// Construction performs every check that can fail, so rendering itself
/// always produces a complete document.
#[derive(Debug)]
pub struct ProjectSerializer<'a> {
    project: &'a Project,
    format_name: String,
    media_url: String,
}

impl<'a> ProjectSerializer<'a> {
    /// Validate a project for export.
    pub fn new(project: &'a Project) -> ExportResult<Self> {
        let asset = project.asset();
        let format_name = video_format_name(asset.height(), asset.frame_rate())?;
        let media_url = file_url(asset.path())?;
        Ok(Self {
            project,
            format_name,
            media_url,
        })
    }

    /// Render the document text.
    pub fn render(&self) -> String {
        let project = self.project;
        let asset = project.asset();
        let timeline = project.timeline();
        let rate = timeline.rate();
        let zero = format_time(Timecode::zero(rate));

        let mut w = XmlWriter::new();
        w.prolog("fcpxml");
        w.open("fcpxml", &[("version", FCPXML_VERSION.to_string())]);

        w.open("resources", &[]);
        let (fd_numer, fd_denom) = rate.frame_duration();
        let mut format_attrs = vec![
            ("id", FORMAT_ID.to_string()),
            ("frameDuration", format!("{fd_numer}/{fd_denom}s")),
        ];
        if asset.has_video() {
            format_attrs.push(("name", self.format_name.clone()));
            format_attrs.push(("width", asset.width().to_string()));
            format_attrs.push(("height", asset.height().to_string()));
        }
        w.empty("format", &format_attrs);

        let mut asset_attrs = vec![
            ("id", ASSET_ID.to_string()),
            ("name", asset.name().to_string()),
            ("start", zero.clone()),
            ("duration", format_time(asset.duration())),
            ("hasVideo", flag(asset.has_video())),
            ("hasAudio", flag(asset.has_audio())),
            ("format", FORMAT_ID.to_string()),
        ];
        if asset.has_audio() {
            asset_attrs.push(("audioSources", "1".to_string()));
            asset_attrs.push(("audioChannels", asset.audio_channels().to_string()));
            asset_attrs.push(("audioRate", asset.audio_sample_rate().to_string()));
        }
        w.open("asset", &asset_attrs);
        w.empty(
            "media-rep",
            &[
                ("kind", "original-media".to_string()),
                ("src", self.media_url.clone()),
            ],
        );
        w.close();
        w.close();

        w.open("library", &[]);
        w.open("event", &[("name", project.event_name().to_string())]);

        let mut project_attrs = vec![("name", project.name().to_string())];
        if let Some(at) = project.modified_at() {
            project_attrs.push(("modDate", at.format("%Y-%m-%d %H:%M:%S %z").to_string()));
        }
        w.open("project", &project_attrs);

        let mut sequence_attrs = vec![
            ("format", FORMAT_ID.to_string()),
            ("duration", format_time(timeline.duration())),
            ("tcStart", zero),
            ("tcFormat", "NDF".to_string()),
        ];
        if asset.has_audio() {
            sequence_attrs.push(("audioLayout", audio_layout(asset.audio_channels()).to_string()));
            sequence_attrs.push(("audioRate", audio_rate_token(asset.audio_sample_rate())));
        }
        w.open("sequence", &sequence_attrs);
        w.open("spine", &[]);
        let captions = project.captions().map(|t| t.captions()).unwrap_or(&[]);
        let caption_role = project
            .captions()
            .map(|t| format!("iTT?captionFormat=ITT.{}", t.language()))
            .unwrap_or_default();
        let mut pending = captions.iter().peekable();
        let mut style_count = 0;
        for segment in timeline.segments() {
            let clip_attrs = [
                ("ref", ASSET_ID.to_string()),
                ("offset", format_time(segment.timeline_start())),
                ("name", asset.name().to_string()),
                ("start", format_time(segment.source_start())),
                ("duration", format_time(segment.duration())),
                ("format", FORMAT_ID.to_string()),
                ("tcFormat", "NDF".to_string()),
            ];

            // Each caption connects to the clip playing at its first frame.
            let clip_end = segment.timeline_end().frames();
            let mut attached = Vec::new();
            while let Some(caption) = pending.next_if(|c| c.start().frames() < clip_end) {
                attached.push(caption);
            }

            if attached.is_empty() {
                w.empty("asset-clip", &clip_attrs);
                continue;
            }
            w.open("asset-clip", &clip_attrs);
            for caption in attached {
                style_count += 1;
                write_caption(&mut w, segment, caption, &caption_role, style_count);
            }
            w.close();
        }

        let text = w.finish();
        tracing::info!(
            project = project.name(),
            clips = timeline.segments().len(),
            captions = captions.len(),
            duration = %timeline.duration(),
            "Rendered FCPXML"
        );
        text
    }
}

/// Validate and render a project in one step.
pub fn render_fcpxml(project: &Project) -> ExportResult<String> {
    Ok(ProjectSerializer::new(project)?.render())
}

/// A connected caption. Its offset is in the parent clip's local time,
/// which for an asset-clip is source time.
fn write_caption(w: &mut XmlWriter, parent: &KeepSegment, caption: &Caption, role: &str, n: usize) {
    let offset = format_time(parent.source_at(caption.start()));
    let style_id = format!("ts{n}");

    w.open(
        "caption",
        &[
            ("lane", CAPTION_LANE.to_string()),
            ("offset", offset.clone()),
            ("name", caption.text().to_string()),
            ("start", offset),
            ("duration", format_time(caption.duration())),
            ("role", role.to_string()),
        ],
    );
    w.open("text", &[("placement", "bottom".to_string())]);
    w.text_element("text-style", &[("ref", style_id.clone())], caption.text());
    w.close();
    w.open("text-style-def", &[("id", style_id)]);
    let style: Vec<(&str, String)> = CAPTION_TEXT_STYLE
        .iter()
        .map(|&(key, value)| (key, value.to_string()))
        .collect();
    w.empty("text-style", &style);
    w.close();
    w.close();
}

fn flag(value: bool) -> String {
    let text = if value { "1" } else { "0" };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use chrono::{TimeZone, Utc};
    use jumpcut_project_model::{
        Asset, CaptionTrack, FrameRange, FrameRate, KeepSegment, MediaInfo, Timeline,
    };
    use std::path::PathBuf;

    fn media(path: &str, rate: FrameRate) -> MediaInfo {
        MediaInfo {
            path: PathBuf::from(path),
            duration_secs: 20.0,
            frame_rate: rate,
            width: 1920,
            height: 1080,
            has_video: true,
            has_audio: true,
            audio_sample_rate: 48_000,
            audio_channels: 2,
        }
    }

    fn project(media: &MediaInfo) -> Project {
        let rate = media.frame_rate;
        let timeline = Timeline::from_segments(
            rate,
            vec![
                KeepSegment::new(FrameRange::new(0, 72), 0, rate).unwrap(),
                KeepSegment::new(FrameRange::new(96, 239), 72, rate).unwrap(),
            ],
        )
        .unwrap();
        Project::new("Take (cut)", "Jumpcut", Asset::from_media(media).unwrap(), timeline).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let p = project(&media("/footage/take.mov", FrameRate::FPS_23_976));
        let xml = render_fcpxml(&p).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE fcpxml>\n"));
        assert!(xml.contains("<fcpxml version=\"1.11\">"));
        assert!(xml.contains(
            "<format id=\"r1\" frameDuration=\"1001/24000s\" name=\"FFVideoFormat1080p2398\" width=\"1920\" height=\"1080\"/>"
        ));
        assert!(xml.contains("<media-rep kind=\"original-media\" src=\"file:///footage/take.mov\"/>"));
        assert!(xml.contains("<event name=\"Jumpcut\">"));
        assert!(xml.contains("<project name=\"Take (cut)\">"));
        assert!(xml.contains("audioLayout=\"stereo\" audioRate=\"48k\""));
        assert_eq!(xml.matches("<asset-clip ").count(), 2);
        assert!(xml.contains(
            "<asset-clip ref=\"r2\" offset=\"72072/24000s\" name=\"take.mov\" start=\"96096/24000s\" duration=\"143143/24000s\" format=\"r1\" tcFormat=\"NDF\"/>"
        ));
        assert!(xml.trim_end().ends_with("</fcpxml>"));
    }

    #[test]
    fn test_mod_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap();
        let p = project(&media("/footage/take.mov", FrameRate::FPS_25)).with_modified_at(at);
        let xml = render_fcpxml(&p).unwrap();
        assert!(xml.contains("modDate=\"2024-03-01 10:15:00 +0000\""));
    }

    #[test]
    fn test_unsupported_rate_produces_no_output() {
        let rate = FrameRate::new(15, 1).unwrap();
        let p = project(&media("/footage/take.mov", rate));
        assert!(matches!(
            render_fcpxml(&p),
            Err(ExportError::UnsupportedFrameRate { .. })
        ));
    }

    #[test]
    fn test_relative_path_rejected() {
        let p = project(&media("footage/take.mov", FrameRate::FPS_25));
        assert!(matches!(
            render_fcpxml(&p),
            Err(ExportError::RelativeMediaPath { .. })
        ));
    }

    #[test]
    fn test_audio_only_asset() {
        let mut m = media("/footage/voice.wav", FrameRate::FPS_25);
        m.has_video = false;
        m.audio_channels = 1;
        let xml = render_fcpxml(&project(&m)).unwrap();
        assert!(xml.contains("<format id=\"r1\" frameDuration=\"1/25s\"/>"));
        assert!(xml.contains("hasVideo=\"0\""));
        assert!(xml.contains("audioLayout=\"mono\""));
    }

    #[test]
    fn test_names_are_escaped() {
        let m = media("/footage/Q&A <final>.mov", FrameRate::FPS_30);
        let xml = render_fcpxml(&project(&m)).unwrap();
        assert!(xml.contains("name=\"Q&amp;A &lt;final&gt;.mov\""));
        assert!(xml.contains("src=\"file:///footage/Q%26A%20%3Cfinal%3E.mov\""));
    }

    #[test]
    fn test_captions_connect_to_the_clip_they_start_in() {
        let rate = FrameRate::FPS_25;
        let tc = |frames| Timecode::new(frames, rate);
        // Timeline [60, 90) starts in the first clip and runs across the cut;
        // [100, 120) sits in the second clip, 28 frames past source frame 96.
        let track = CaptionTrack::new(
            "en",
            vec![
                Caption::new(tc(60), tc(90), "Fish & chips").unwrap(),
                Caption::new(tc(100), tc(120), "Second").unwrap(),
            ],
        )
        .unwrap();
        let p = project(&media("/footage/take.mov", rate))
            .with_captions(track)
            .unwrap();
        let xml = render_fcpxml(&p).unwrap();

        assert!(xml.contains(
            "<asset-clip ref=\"r2\" offset=\"0s\" name=\"take.mov\" start=\"0s\" duration=\"72/25s\" format=\"r1\" tcFormat=\"NDF\">"
        ));
        assert!(xml.contains(
            "<caption lane=\"1\" offset=\"60/25s\" name=\"Fish &amp; chips\" start=\"60/25s\" duration=\"30/25s\" role=\"iTT?captionFormat=ITT.en\">"
        ));
        assert!(xml.contains("<text-style ref=\"ts1\">Fish &amp; chips</text-style>"));
        assert!(xml.contains(
            "<caption lane=\"1\" offset=\"124/25s\" name=\"Second\" start=\"124/25s\" duration=\"20/25s\" role=\"iTT?captionFormat=ITT.en\">"
        ));
        assert!(xml.contains("<text-style-def id=\"ts2\">"));
        assert_eq!(xml.matches("<caption ").count(), 2);
        assert_eq!(xml.matches("</asset-clip>").count(), 2);
        assert_eq!(xml.matches("<asset-clip ").count(), 2);
    }

    #[test]
    fn test_no_captions_keeps_clips_self_closing() {
        let p = project(&media("/footage/take.mov", FrameRate::FPS_25));
        let xml = render_fcpxml(&p).unwrap();
        assert!(!xml.contains("<caption"));
        assert!(!xml.contains("</asset-clip>"));
    }
}
