//! The project document: one asset, one timeline.
//!
//! A [`Project`] is assembled once from an asset and the timeline cut from
//! it, optionally carrying a caption track, and is read-only afterwards.
//! Serializers only ever see a validated project.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::caption::CaptionTrack;
use crate::error::{ModelError, ModelResult};
use crate::media::Asset;
use crate::timeline::Timeline;

/// Top-level document handed to the interchange serializer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    name: String,
    event_name: String,
    modified_at: Option<DateTime<Utc>>,
    asset: Asset,
    timeline: Timeline,
    captions: Option<CaptionTrack>,
}

impl Project {
    /// Assemble a project, checking that the timeline was cut from this
    /// asset: same frame rate, and no segment past the end of the media.
    pub fn new(
        name: impl Into<String>,
        event_name: impl Into<String>,
        asset: Asset,
        timeline: Timeline,
    ) -> ModelResult<Self> {
        if timeline.rate() != asset.frame_rate() {
            return Err(ModelError::RateMismatch {
                left: asset.frame_rate(),
                right: timeline.rate(),
            });
        }
        if timeline.source_end().frames() > asset.duration().frames() {
            return Err(ModelError::InvalidProject {
                message: format!(
                    "timeline reaches frame {} but {} has only {} frames",
                    timeline.source_end().frames(),
                    asset.name(),
                    asset.duration().frames()
                ),
            });
        }

        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::InvalidProject {
                message: "project name is empty".to_string(),
            });
        }

        Ok(Self {
            name,
            event_name: event_name.into(),
            modified_at: None,
            asset,
            timeline,
            captions: None,
        })
    }

    /// Stamp the project with a modification date.
    pub fn with_modified_at(mut self, at: DateTime<Utc>) -> Self {
        self.modified_at = Some(at);
        self
    }

    /// Attach captions. Every caption must be at the timeline's rate and end
    /// within the timeline.
    pub fn with_captions(mut self, track: CaptionTrack) -> ModelResult<Self> {
        let rate = self.timeline.rate();
        let duration = self.timeline.duration().frames();
        for caption in track.captions() {
            if caption.start().rate() != rate {
                return Err(ModelError::RateMismatch {
                    left: rate,
                    right: caption.start().rate(),
                });
            }
            if caption.end().frames() > duration {
                return Err(ModelError::InvalidProject {
                    message: format!(
                        "caption {:?} ends at frame {} past the timeline end {duration}",
                        caption.text(),
                        caption.end().frames()
                    ),
                });
            }
        }
        self.captions = Some(track);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn captions(&self) -> Option<&CaptionTrack> {
        self.captions.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caption::Caption;
    use crate::interval::FrameRange;
    use crate::media::MediaInfo;
    use crate::timecode::{FrameRate, Timecode};
    use crate::timeline::KeepSegment;

    fn media(rate: FrameRate) -> MediaInfo {
        MediaInfo {
            path: "/media/talk.mov".into(),
            duration_secs: 10.0,
            frame_rate: rate,
            width: 1920,
            height: 1080,
            has_video: true,
            has_audio: true,
            audio_sample_rate: 48_000,
            audio_channels: 2,
        }
    }

    fn timeline(rate: FrameRate, end: i64) -> Timeline {
        Timeline::from_segments(
            rate,
            vec![KeepSegment::new(FrameRange::new(0, end), 0, rate).unwrap()],
        )
        .unwrap()
    }

    #[test]
    fn test_project_creation() {
        let asset = Asset::from_media(&media(FrameRate::FPS_25)).unwrap();
        let project = Project::new("Talk", "Jumpcut", asset, timeline(FrameRate::FPS_25, 250))
            .unwrap()
            .with_modified_at(DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(project.name(), "Talk");
        assert_eq!(project.timeline().duration().frames(), 250);
        assert_eq!(project.modified_at(), Some(DateTime::<Utc>::UNIX_EPOCH));
    }

    #[test]
    fn test_project_rejects_rate_mismatch() {
        let asset = Asset::from_media(&media(FrameRate::FPS_25)).unwrap();
        let result = Project::new("Talk", "Jumpcut", asset, timeline(FrameRate::FPS_24, 10));
        assert!(matches!(result, Err(ModelError::RateMismatch { .. })));
    }

    #[test]
    fn test_project_rejects_timeline_past_media_end() {
        let asset = Asset::from_media(&media(FrameRate::FPS_25)).unwrap();
        let result = Project::new("Talk", "Jumpcut", asset, timeline(FrameRate::FPS_25, 251));
        assert!(matches!(result, Err(ModelError::InvalidProject { .. })));
    }

    #[test]
    fn test_project_rejects_empty_name() {
        let asset = Asset::from_media(&media(FrameRate::FPS_25)).unwrap();
        let result = Project::new("  ", "Jumpcut", asset, timeline(FrameRate::FPS_25, 10));
        assert!(result.is_err());
    }

    #[test]
    fn test_captions_must_fit_the_timeline() {
        let rate = FrameRate::FPS_25;
        let project = || {
            let asset = Asset::from_media(&media(rate)).unwrap();
            Project::new("Talk", "Jumpcut", asset, timeline(rate, 100)).unwrap()
        };
        let caption = |start: i64, end: i64| {
            Caption::new(Timecode::new(start, rate), Timecode::new(end, rate), "hi").unwrap()
        };

        let with = project()
            .with_captions(CaptionTrack::new("en", vec![caption(90, 100)]).unwrap())
            .unwrap();
        assert_eq!(with.captions().unwrap().captions().len(), 1);

        let past_end =
            project().with_captions(CaptionTrack::new("en", vec![caption(90, 101)]).unwrap());
        assert!(matches!(past_end, Err(ModelError::InvalidProject { .. })));

        let other_rate = Caption::new(
            Timecode::new(0, FrameRate::FPS_24),
            Timecode::new(10, FrameRate::FPS_24),
            "hi",
        )
        .unwrap();
        let mismatched =
            project().with_captions(CaptionTrack::new("en", vec![other_rate]).unwrap());
        assert!(matches!(mismatched, Err(ModelError::RateMismatch { .. })));
    }
}
