//! Jumpcut Project Model
//!
//! Defines the core data contracts for silence-cut projects:
//! - **Timecode:** Frame counts over an exact rational frame rate
//! - **Intervals:** Raw and frame-aligned silence spans
//! - **Timeline:** Keep segments laid out gap-free, with source/timeline mapping
//! - **Captions:** Transcript cues placed on the edited timeline
//! - **Project:** The document aggregate (one asset, one timeline, optional captions)
//!
//! All timing is integer frame arithmetic. Seconds only appear at ingestion
//! and in human-facing output.

pub mod caption;
pub mod error;
pub mod interval;
pub mod media;
pub mod project;
pub mod timecode;
pub mod timeline;

pub use caption::*;
pub use error::*;
pub use interval::*;
pub use media::*;
pub use project::*;
pub use timecode::*;
pub use timeline::*;
