//! Patch application errors.

/// Specific reasons an operation cannot be applied to the working sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ApplyErrorKind {
    /// No shot with this idx exists in the current working sequence
    #[display("{}: idx not found: {}", op, idx)]
    IdxNotFound {
        /// Operation name
        op: &'static str,
        /// Missing idx
        idx: usize,
    },
    /// Merge bounds are reversed, either as given or by current position
    #[display("merge: invalid range {}..={}", start, end)]
    InvalidRange {
        /// First idx of the range
        start: usize,
        /// Last idx of the range
        end: usize,
    },
    /// Merge bounds do not span exactly `end - start + 1` adjacent shots
    #[display("merge: range {}..={} must be contiguous", start, end)]
    NonContiguous {
        /// First idx of the range
        start: usize,
        /// Last idx of the range
        end: usize,
    },
    /// move_tail shots are not `from` and `from + 1`, or not neighbours
    #[display("move_tail: {} -> {} must be adjacent", from, to)]
    NotAdjacent {
        /// Source idx
        from: usize,
        /// Destination idx
        to: usize,
    },
    /// The op would cross or include a scene break while that is forbidden
    #[display("{}: cannot touch scene_break", op)]
    SceneBreak {
        /// Operation name
        op: &'static str,
    },
    /// The op would leave a shot with nothing but whitespace
    #[display("{}: would create empty shot", op)]
    EmptyShot {
        /// Operation name
        op: &'static str,
    },
    /// The split marker is not a substring of the shot text
    #[display("split: marker {:?} not found in shot {}", marker, idx)]
    MarkerNotFound {
        /// Target idx
        idx: usize,
        /// Marker text
        marker: String,
    },
    /// move_tail sentence count outside `0 < k < sentence_count`
    #[display("move_tail: invalid sentences count {} (shot has {})", requested, available)]
    SentenceCount {
        /// Requested number of tail sentences
        requested: usize,
        /// Sentences found in the source shot
        available: usize,
    },
}

/// Error type for patch application.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{ApplyError, ApplyErrorKind};
///
/// let err = ApplyError::new(ApplyErrorKind::IdxNotFound { op: "tag", idx: 7 });
/// assert!(format!("{}", err).contains("idx not found: 7"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Apply Error: {} at line {} in {}", kind, line, file)]
pub struct ApplyError {
    /// The specific error condition
    pub kind: ApplyErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ApplyError {
    /// Create a new ApplyError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApplyErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for patch application.
pub type ApplyResult<T> = Result<T, ApplyError>;
