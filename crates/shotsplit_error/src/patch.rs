//! Patch shape and syntax errors.
//!
//! These are raised before any operation is applied, while the collaborator's
//! response is still an untyped JSON value.

/// Specific reasons a patch object is rejected before application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PatchErrorKind {
    /// The patch is not a JSON object
    #[display("patch must be a JSON object")]
    NotAnObject,
    /// A required top-level key is absent
    #[display("missing key: {}", _0)]
    MissingKey(String),
    /// A top-level key outside the wire schema is present
    #[display("unexpected key: {}", _0)]
    UnexpectedKey(String),
    /// `schema_version` does not match the supported literal
    #[display("unsupported schema_version: {}", _0)]
    UnsupportedSchemaVersion(String),
    /// A top-level field has the wrong JSON type
    #[display("{} must be {}", field, expected)]
    InvalidField {
        /// Field name
        field: String,
        /// Expected JSON type
        expected: String,
    },
    /// An entry of `ops` is not a JSON object
    #[display("op #{} must be an object", _0)]
    OpNotObject(usize),
    /// An entry of `ops` names an operation outside the supported set
    #[display("invalid op type at #{}: {}", position, op)]
    InvalidOpType {
        /// Position of the op in the list
        position: usize,
        /// The offending tag, or `<missing>`
        op: String,
    },
    /// A recognized op carries missing or mistyped arguments
    #[display("malformed {} op at #{}: {}", op, position, message)]
    MalformedOp {
        /// Position of the op in the list
        position: usize,
        /// The op tag
        op: String,
        /// Deserializer message
        message: String,
    },
    /// A constraints field is absent
    #[display("constraints missing: {}", _0)]
    ConstraintsMissing(String),
    /// A constraints field has the wrong primitive type
    #[display("constraints.{} must be {}", field, expected)]
    ConstraintsType {
        /// Field name
        field: String,
        /// Expected primitive type
        expected: String,
    },
}

/// Error type for patch shape and syntax validation.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{PatchError, PatchErrorKind};
///
/// let err = PatchError::new(PatchErrorKind::MissingKey("ops".to_string()));
/// assert!(format!("{}", err).contains("missing key: ops"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Patch Error: {} at line {} in {}", kind, line, file)]
pub struct PatchError {
    /// The specific error condition
    pub kind: PatchErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PatchError {
    /// Create a new PatchError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PatchErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for patch validation.
pub type PatchResult<T> = Result<T, PatchError>;
