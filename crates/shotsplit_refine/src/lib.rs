//! Validated patch application and collaborator-driven shot refinement.
//!
//! The pipeline for one chapter:
//!
//! 1. [`build_user_prompt`] serializes the baseline (idx, kind, text only)
//! 2. the [`PatchCollaborator`](shotsplit_interface::PatchCollaborator) returns a JSON patch
//! 3. [`parse_patch`] checks shape, op tags, and the echoed constraints
//! 4. [`apply_patch`] runs the ops against a copy of the baseline
//! 5. [`validate_text_conservation`] and [`validate_count_range`] gate the result
//!
//! [`ShotRefiner`] runs these steps and converts any failure into
//! [`RefineOutcome::Fallback`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod applier;
mod outcome;
mod prompt;
mod refiner;
mod validator;

pub use applier::apply_patch;
pub use outcome::{RefineFailure, RefineOutcome};
pub use prompt::{SYSTEM_PROMPT, build_user_prompt};
pub use refiner::ShotRefiner;
pub use validator::{
    PATCH_KEYS, parse_patch, validate_constraints, validate_count_range, validate_ops_syntax,
    validate_patch_shape, validate_text_conservation,
};
