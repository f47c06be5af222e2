//! Jumpcut Audio Analysis Boundary
//!
//! Reads the output of the external audio tools and writes subtitles:
//! - **Silence:** ffmpeg `silencedetect` logs or JSON interval lists
//! - **Transcription:** Whisper JSON transcripts, re-projected onto the cut
//! - **Subtitle Generation:** SRT/VTT output from re-projected cues
//! - **Takes:** Heuristic bad-take review of a transcript

pub mod silence;
pub mod subtitles;
pub mod takes;
pub mod transcription;

pub use silence::*;
pub use subtitles::*;
pub use takes::*;
pub use transcription::*;
