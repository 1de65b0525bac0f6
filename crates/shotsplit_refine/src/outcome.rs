//! Result of one refinement attempt.

use shotsplit_core::{Patch, Shot};
use shotsplit_error::{FailureCategory, ShotsplitError};

/// Why a refinement attempt fell back to the baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineFailure {
    /// Stage the failure belongs to
    pub category: FailureCategory,
    /// Human-readable cause
    pub message: String,
}

impl From<&ShotsplitError> for RefineFailure {
    fn from(err: &ShotsplitError) -> Self {
        Self {
            category: err.category(),
            message: err.to_string(),
        }
    }
}

/// Outcome of [`crate::ShotRefiner::refine`]. Never an error.
///
/// # Examples
///
/// ```
/// use shotsplit_core::{Shot, ShotKind};
/// use shotsplit_error::FailureCategory;
/// use shotsplit_refine::{RefineFailure, RefineOutcome};
///
/// let outcome = RefineOutcome::Fallback {
///     shots: vec![Shot::new(0, ShotKind::Mixed, "原文。")],
///     failure: RefineFailure {
///         category: FailureCategory::Transport,
///         message: "HTTP 503".to_string(),
///     },
/// };
/// assert!(outcome.used_fallback());
/// assert_eq!(outcome.error_message(), Some("HTTP 503"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RefineOutcome {
    /// The collaborator's patch passed every check
    Refined {
        /// Refined shots, renumbered from zero
        shots: Vec<Shot>,
        /// The accepted patch
        patch: Patch,
    },
    /// Something failed; the baseline is returned unmodified
    Fallback {
        /// The baseline shots
        shots: Vec<Shot>,
        /// What went wrong
        failure: RefineFailure,
    },
}

impl RefineOutcome {
    /// The shots to use downstream.
    pub fn shots(&self) -> &[Shot] {
        match self {
            RefineOutcome::Refined { shots, .. } | RefineOutcome::Fallback { shots, .. } => shots,
        }
    }

    /// Consume the outcome, keeping only the shots.
    pub fn into_shots(self) -> Vec<Shot> {
        match self {
            RefineOutcome::Refined { shots, .. } | RefineOutcome::Fallback { shots, .. } => shots,
        }
    }

    /// Whether the baseline was returned.
    pub fn used_fallback(&self) -> bool {
        matches!(self, RefineOutcome::Fallback { .. })
    }

    /// The accepted patch, if refinement succeeded.
    pub fn patch(&self) -> Option<&Patch> {
        match self {
            RefineOutcome::Refined { patch, .. } => Some(patch),
            RefineOutcome::Fallback { .. } => None,
        }
    }

    /// The fallback cause, if any.
    pub fn failure(&self) -> Option<&RefineFailure> {
        match self {
            RefineOutcome::Refined { .. } => None,
            RefineOutcome::Fallback { failure, .. } => Some(failure),
        }
    }

    /// The fallback cause as text, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }
}
