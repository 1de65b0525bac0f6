//! Settings resolution errors.

/// Reasons collaborator or segmentation settings cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// Neither `SHOTSPLIT_API_KEY` nor `SILICONFLOW_API_KEY` is set
    #[display("missing SHOTSPLIT_API_KEY or SILICONFLOW_API_KEY (from .env or env)")]
    MissingApiKey,
    /// A timeout value is not a positive, representable number of seconds
    #[display("invalid timeout value: {}", _0)]
    InvalidTimeout(String),
    /// A settings source could not be loaded
    #[display("failed to load settings: {}", _0)]
    Load(String),
    /// The merged settings do not match the expected layout
    #[display("failed to parse settings: {}", _0)]
    Parse(String),
}

/// Error type for settings resolution.
///
/// # Examples
///
/// ```
/// use shotsplit_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingApiKey);
/// assert!(err.to_string().contains("SHOTSPLIT_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The specific error condition
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
