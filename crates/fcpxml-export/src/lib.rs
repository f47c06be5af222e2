//! Jumpcut FCPXML Export
//!
//! Serializes a cut [`Project`](jumpcut_project_model::Project) into an
//! FCPXML 1.11 document for Final Cut Pro.
//!
//! # Document Layout
//!
//! ```text
//! fcpxml
//! ├── resources
//! │   ├── format r1        (frame duration, frame size)
//! │   └── asset r2         (source media, media-rep file URL)
//! └── library
//!     └── event
//!         └── project
//!             └── sequence
//!                 └── spine
//!                     └── asset-clip × keep segment
//!                         └── caption × cue starting in the clip (lane 1)
//! ```
//!
//! Every time attribute is written as an exact rational number of seconds
//! that is a whole multiple of the frame duration.

pub mod error;
pub mod format;
pub mod serializer;
pub mod time;
pub mod url;
pub mod xml;

pub use error::{ExportError, ExportResult};
pub use serializer::{render_fcpxml, ProjectSerializer, FCPXML_VERSION};
pub use time::{format_time, parse_time};
