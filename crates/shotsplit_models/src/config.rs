//! Configuration for the collaborator client and the CLI pipeline.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from shotsplit.toml)
//! - `~/.config/shotsplit/shotsplit.toml`
//! - `./shotsplit.toml`
//! - Environment (`SHOTSPLIT_*`, then `SILICONFLOW_*`), after a `.env` is loaded
//! - Explicit [`CollaboratorOverrides`]
//!
//! The API key is never read from a TOML file.

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use shotsplit_core::{Constraints, SplitConfig};
use shotsplit_error::{ConfigError, ConfigErrorKind, ShotsplitError, ShotsplitResult};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../shotsplit.toml");

/// Environment prefixes, highest precedence first.
pub const ENV_PREFIXES: [&str; 2] = ["SHOTSPLIT", "SILICONFLOW"];

/// Collaborator settings as they appear in `[collaborator]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorSettings {
    /// API root, without the `/chat/completions` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling parameter
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Request `response_format: {"type": "json_object"}`
    #[serde(default = "default_json_mode")]
    pub json_mode: bool,
}

fn default_base_url() -> String {
    "https://api.siliconflow.cn/v1".to_string()
}

fn default_model() -> String {
    "deepseek-ai/DeepSeek-V3.2".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.2
}

fn default_top_p() -> f32 {
    0.9
}

fn default_json_mode() -> bool {
    true
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            json_mode: default_json_mode(),
        }
    }
}

/// Values supplied explicitly by the caller (e.g. CLI flags).
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct CollaboratorOverrides {
    /// API key
    pub api_key: Option<String>,
    /// API root
    pub base_url: Option<String>,
    /// Model identifier
    pub model: Option<String>,
    /// Timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Fully resolved collaborator configuration, built once at startup.
#[derive(Clone, PartialEq, derive_getters::Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct CollaboratorConfig {
    /// Bearer token
    #[setters(skip)]
    api_key: String,
    /// API root
    #[setters(into)]
    base_url: String,
    /// Model identifier
    #[setters(into)]
    model: String,
    /// Request timeout
    timeout: Duration,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling parameter
    top_p: f32,
    /// Request JSON mode
    json_mode: bool,
}

impl std::fmt::Debug for CollaboratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollaboratorConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("json_mode", &self.json_mode)
            .finish()
    }
}

impl CollaboratorConfig {
    /// Create a configuration with bundled defaults for everything but the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotsplit_models::CollaboratorConfig;
    ///
    /// let config = CollaboratorConfig::new("sk-test").with_model("Qwen/Qwen3-8B");
    /// assert_eq!(config.model(), "Qwen/Qwen3-8B");
    /// assert!(!format!("{:?}", config).contains("sk-test"));
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        let settings = CollaboratorSettings::default();
        Self {
            api_key: api_key.into(),
            base_url: settings.base_url,
            model: settings.model,
            timeout: Duration::from_secs(settings.timeout_secs),
            temperature: settings.temperature,
            top_p: settings.top_p,
            json_mode: settings.json_mode,
        }
    }
}

/// Look up `{prefix}_{suffix}` for each prefix in order, skipping blank values.
fn env_value(lookup: &impl Fn(&str) -> Option<String>, suffix: &str) -> Option<String> {
    ENV_PREFIXES.iter().find_map(|prefix| {
        lookup(&format!("{}_{}", prefix, suffix))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

impl CollaboratorSettings {
    /// Resolve against explicit overrides and an environment lookup.
    ///
    /// # Errors
    ///
    /// Fails when no API key is found or a timeout value is not a positive number.
    ///
    /// # Examples
    ///
    /// ```
    /// use shotsplit_models::{CollaboratorOverrides, CollaboratorSettings};
    ///
    /// let env = |key: &str| match key {
    ///     "SILICONFLOW_API_KEY" => Some("sk-env".to_string()),
    ///     "SHOTSPLIT_MODEL" => Some("Qwen/Qwen3-8B".to_string()),
    ///     _ => None,
    /// };
    /// let config = CollaboratorSettings::default()
    ///     .resolve_with(&CollaboratorOverrides::default(), env)
    ///     .unwrap();
    /// assert_eq!(config.api_key(), "sk-env");
    /// assert_eq!(config.model(), "Qwen/Qwen3-8B");
    /// ```
    pub fn resolve_with(
        &self,
        overrides: &CollaboratorOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<CollaboratorConfig, ConfigError> {
        let api_key = overrides
            .api_key
            .clone()
            .or_else(|| env_value(&lookup, "API_KEY"))
            .ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingApiKey))?;

        let base_url = overrides
            .base_url
            .clone()
            .or_else(|| env_value(&lookup, "BASE_URL"))
            .unwrap_or_else(|| self.base_url.clone());

        let model = overrides
            .model
            .clone()
            .or_else(|| env_value(&lookup, "MODEL"))
            .unwrap_or_else(|| self.model.clone());

        let timeout = match overrides.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => match env_value(&lookup, "TIMEOUT_S") {
                Some(raw) => parse_timeout(&raw)?,
                None => Duration::from_secs(self.timeout_secs),
            },
        };

        Ok(CollaboratorConfig {
            api_key,
            base_url,
            model,
            timeout,
            temperature: self.temperature,
            top_p: self.top_p,
            json_mode: self.json_mode,
        })
    }

    /// Resolve against the process environment, loading `.env` first if present.
    ///
    /// # Errors
    ///
    /// See [`CollaboratorSettings::resolve_with`].
    #[instrument(skip_all)]
    pub fn resolve(&self, overrides: &CollaboratorOverrides) -> Result<CollaboratorConfig, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) => debug!(error = %e, "No .env loaded"),
        }
        self.resolve_with(overrides, |key| std::env::var(key).ok())
    }
}

/// Positive, finite seconds that fit in a [`Duration`].
fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::new(ConfigErrorKind::InvalidTimeout(raw.to_string()));
    let secs: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if secs <= 0.0 {
        return Err(invalid());
    }
    Duration::try_from_secs_f64(secs).map_err(|_| invalid())
}

/// Top-level configuration file layout.
///
/// ```toml
/// [collaborator]
/// model = "deepseek-ai/DeepSeek-V3.2"
///
/// [split]
/// soft_target = 140
///
/// [constraints]
/// min_shots = 60
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShotsplitConfig {
    /// Collaborator endpoint and sampling
    #[serde(default)]
    pub collaborator: CollaboratorSettings,
    /// Baseline segmentation thresholds
    #[serde(default)]
    pub split: SplitConfig,
    /// Refinement constraints
    #[serde(default)]
    pub constraints: Constraints,
}

fn build_error(e: config::ConfigError) -> ShotsplitError {
    ShotsplitError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
}

fn parse_error(e: config::ConfigError) -> ShotsplitError {
    ShotsplitError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
}

impl ShotsplitConfig {
    /// Load configuration from a specific file, layered over bundled defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ShotsplitResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    #[instrument]
    pub fn load() -> ShotsplitResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/shotsplit/shotsplit.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("shotsplit").required(false));

        builder
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }

    /// Parse the bundled defaults alone.
    pub fn bundled() -> ShotsplitResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(build_error)?
            .try_deserialize()
            .map_err(parse_error)
    }
}
