//! Top-level error wrapper types.

use crate::{ApplyError, CollaboratorError, ConfigError, InvariantError, IoError, PatchError};

/// Every error family the workspace can produce.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{CollaboratorError, CollaboratorErrorKind, ShotsplitError};
///
/// let err: ShotsplitError =
///     CollaboratorError::new(CollaboratorErrorKind::Request("connection refused".into())).into();
/// assert!(format!("{}", err).contains("Collaborator Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ShotsplitErrorKind {
    /// Collaborator transport, envelope, or content error
    #[from(CollaboratorError)]
    Collaborator(CollaboratorError),
    /// Settings resolution error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Local file or document error
    #[from(IoError)]
    Io(IoError),
    /// Patch shape or op syntax error
    #[from(PatchError)]
    Patch(PatchError),
    /// Patch application error
    #[from(ApplyError)]
    Apply(ApplyError),
    /// Post-application invariant violation
    #[from(InvariantError)]
    Invariant(InvariantError),
}

/// Coarse classification of a failure, used to branch on fallback causes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureCategory {
    /// Network, status, envelope, or content-format failure from the collaborator
    #[display("transport")]
    Transport,
    /// Patch shape or op syntax failure
    #[display("shape")]
    Shape,
    /// An op could not be applied
    #[display("application")]
    Application,
    /// Text conservation or shot count violated
    #[display("invariant")]
    Invariant,
    /// Local failure: settings, files, or document encoding
    #[display("other")]
    Other,
}

/// Shotsplit error with kind discrimination.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{FailureCategory, PatchError, PatchErrorKind, ShotsplitResult};
///
/// fn might_fail() -> ShotsplitResult<()> {
///     Err(PatchError::new(PatchErrorKind::NotAnObject))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert_eq!(err.category(), FailureCategory::Shape);
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Shotsplit Error: {}", _0)]
pub struct ShotsplitError(Box<ShotsplitErrorKind>);

impl ShotsplitError {
    /// Create a new error from a kind.
    pub fn new(kind: ShotsplitErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ShotsplitErrorKind {
        &self.0
    }

    /// Which stage of refinement the error belongs to.
    pub fn category(&self) -> FailureCategory {
        match self.kind() {
            ShotsplitErrorKind::Collaborator(_) => FailureCategory::Transport,
            ShotsplitErrorKind::Patch(_) => FailureCategory::Shape,
            ShotsplitErrorKind::Apply(_) => FailureCategory::Application,
            ShotsplitErrorKind::Invariant(_) => FailureCategory::Invariant,
            ShotsplitErrorKind::Config(_) | ShotsplitErrorKind::Io(_) => FailureCategory::Other,
        }
    }
}

// Generic From implementation for any type that converts to ShotsplitErrorKind
impl<T> From<T> for ShotsplitError
where
    T: Into<ShotsplitErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for shotsplit operations.
pub type ShotsplitResult<T> = std::result::Result<T, ShotsplitError>;
