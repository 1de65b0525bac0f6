//! Error types for the shotsplit workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! [`ShotsplitError`] boxes any of them and exposes a [`FailureCategory`]
//! so the refinement fallback can report why it happened without matching
//! on message text.
//!
//! # Examples
//!
//! ```
//! use shotsplit_error::{CollaboratorError, CollaboratorErrorKind, ShotsplitResult};
//!
//! fn fetch_patch() -> ShotsplitResult<String> {
//!     Err(CollaboratorError::new(CollaboratorErrorKind::Request(
//!         "connection refused".to_string(),
//!     )))?
//! }
//!
//! match fetch_patch() {
//!     Ok(patch) => println!("Got: {}", patch),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod apply;
mod collaborator;
mod config;
mod error;
mod invariant;
mod io;
mod patch;

pub use apply::{ApplyError, ApplyErrorKind, ApplyResult};
pub use collaborator::{CollaboratorError, CollaboratorErrorKind, CollaboratorResult};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{FailureCategory, ShotsplitError, ShotsplitErrorKind, ShotsplitResult};
pub use invariant::{InvariantError, InvariantErrorKind, InvariantResult};
pub use io::{IoError, IoErrorKind};
pub use patch::{PatchError, PatchErrorKind, PatchResult};
