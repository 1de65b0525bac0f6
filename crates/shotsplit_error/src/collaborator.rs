//! Collaborator exchange errors.
//!
//! Everything that can go wrong between handing the prompt to the
//! collaborator and holding a JSON object that claims to be a patch.

use std::time::Duration;

/// Specific ways a collaborator exchange fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum CollaboratorErrorKind {
    /// The HTTP client could not be constructed
    #[display("failed to build HTTP client: {}", _0)]
    ClientSetup(String),
    /// The chat request could not be assembled
    #[display("failed to build request: {}", _0)]
    RequestSetup(String),
    /// The request never produced a response
    #[display("request failed: {}", _0)]
    Request(String),
    /// The operation-level deadline expired
    #[display("collaborator call timed out after {:?}", _0)]
    Timeout(Duration),
    /// The endpoint answered with a non-success status
    #[display("HTTP {}: {}", status, body)]
    Status {
        /// HTTP status code
        status: u16,
        /// Truncated response body
        body: String,
    },
    /// The response body could not be read
    #[display("failed to read response body: {}", _0)]
    Body(String),
    /// The chat envelope lacks `choices[0].message.content`
    #[display("unexpected response shape: {}", _0)]
    Envelope(String),
    /// The message content is not a JSON object
    #[display("patch content is not a JSON object ({}): {}", reason, snippet)]
    Content {
        /// Parser message or the JSON type found instead
        reason: String,
        /// Truncated content
        snippet: String,
    },
}

/// Error raised while obtaining a patch from the collaborator.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{CollaboratorError, CollaboratorErrorKind};
///
/// let err = CollaboratorError::new(CollaboratorErrorKind::Status {
///     status: 503,
///     body: "busy".to_string(),
/// });
/// assert!(format!("{}", err).contains("HTTP 503: busy"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Collaborator Error: {} at line {} in {}", kind, line, file)]
pub struct CollaboratorError {
    /// The specific error condition
    pub kind: CollaboratorErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl CollaboratorError {
    /// Create a new CollaboratorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CollaboratorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for collaborator exchanges.
pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
