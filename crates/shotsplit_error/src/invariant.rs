//! Post-application invariant violations.

/// Invariants checked after a patch has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum InvariantErrorKind {
    /// Normalized refined text differs from normalized baseline text
    #[display(
        "text conservation failed: refined text differs from baseline ({} vs {} chars)",
        refined_chars,
        baseline_chars
    )]
    TextConservation {
        /// Normalized baseline length in chars
        baseline_chars: usize,
        /// Normalized refined length in chars
        refined_chars: usize,
    },
    /// Refined shot count outside the effective window
    #[display("shot count out of range: {} not in [{},{}]", count, min, max)]
    CountRange {
        /// Refined shot count
        count: usize,
        /// Effective minimum
        min: usize,
        /// Effective maximum
        max: usize,
    },
}

/// Error type for invariant violations.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invariant Error: {} at line {} in {}", kind, line, file)]
pub struct InvariantError {
    /// The violated invariant
    pub kind: InvariantErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl InvariantError {
    /// Create a new InvariantError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InvariantErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for invariant checks.
pub type InvariantResult<T> = Result<T, InvariantError>;
