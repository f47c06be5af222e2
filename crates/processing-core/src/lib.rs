//! Jumpcut Processing Core
//!
//! Turns detected silence into an edited timeline:
//! - **Merge:** Sort and coalesce overlapping or near-adjacent silences
//! - **Keep:** Complement the silences against the clip under a cut policy
//! - **Build:** Lay the kept segments out back to back on the output timeline
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod builder;
pub mod error;
pub mod keep;
pub mod merge;
pub mod pipeline;
pub mod policy;

pub use builder::TimelineBuilder;
pub use error::{CutError, CutResult};
pub use keep::{CutPlan, KeepSegmentComputer};
pub use merge::SilenceMerger;
pub use pipeline::{CutReport, SilenceCutter};
pub use policy::CutPolicy;
