//! Local input and output errors.
//!
//! Chapter reads, shot script writes, and encoding of documents produced on
//! this side of the collaborator boundary.

/// What went wrong handling a local file or document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IoErrorKind {
    /// A chapter file could not be read as UTF-8 text
    #[display("failed to read {}: {}", path, message)]
    Read {
        /// Offending path
        path: String,
        /// Underlying error
        message: String,
    },
    /// An output file or its directory could not be written
    #[display("failed to write {}: {}", path, message)]
    Write {
        /// Offending path
        path: String,
        /// Underlying error
        message: String,
    },
    /// A chapter directory could not be listed
    #[display("failed to list {}: {}", path, message)]
    List {
        /// Offending path
        path: String,
        /// Underlying error
        message: String,
    },
    /// A locally built document could not be serialized
    #[display("failed to serialize {}: {}", what, message)]
    Serialize {
        /// Document being encoded
        what: &'static str,
        /// Serializer message
        message: String,
    },
}

/// Error type for local files and documents.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("IO Error: {} at line {} in {}", kind, line, file)]
pub struct IoError {
    /// The specific error condition
    pub kind: IoErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl IoError {
    /// Create a new IoError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
