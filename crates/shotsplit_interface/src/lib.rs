//! Trait definitions for the shotsplit refinement seam.
//!
//! The refinement orchestrator depends only on [`PatchCollaborator`]; concrete
//! HTTP clients live in `shotsplit_models`, and tests substitute scripted
//! in-memory implementations.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::PatchCollaborator;
