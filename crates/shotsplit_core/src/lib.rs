//! Core data types for shot segmentation and refinement.
//!
//! This crate holds the value types shared by the baseline segmenter, the
//! patch interpreter, and the collaborator clients. It performs no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod constraints;
mod patch;
mod request;
mod shot;
mod split_config;
mod telemetry;
mod text;

pub use constraints::{Constraints, ShotBounds};
pub use patch::{AdvisoryConstraints, OP_NAMES, Op, PATCH_SCHEMA_VERSION, Patch};
pub use request::{RefineRequest, ShotView};
pub use shot::{Shot, ShotKind, Tags};
pub use split_config::SplitConfig;
pub use telemetry::init_tracing;
pub use text::{concat_text, normalize_text, normalized_concat};
