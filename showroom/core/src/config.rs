//! Showroom Configuration
//!
//! Timing, limits and scripted texts for the showroom, loaded from a TOML
//! file at `~/.config/mirra/showroom.toml`.
//!
//! # Configuration Priority
//!
//! Values are resolved with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables (`MIRRA_*`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [carousel]
//! interval_ms = 3000
//! autoplay = true
//!
//! [chat]
//! reply_delay_ms = 1000
//! greeting = "Hi there! I'm your smart stylist. What's your style preference today?"
//!
//! [upload]
//! max_bytes = 5242880
//!
//! [display]
//! toast_ms = 4000
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::{GREETING, SCRIPTED_REPLY};
use crate::upload::MAX_UPLOAD_BYTES;

const ENV_CAROUSEL_INTERVAL: &str = "MIRRA_CAROUSEL_INTERVAL_MS";
const ENV_REPLY_DELAY: &str = "MIRRA_REPLY_DELAY_MS";
const ENV_MAX_UPLOAD: &str = "MIRRA_MAX_UPLOAD_BYTES";
const ENV_AUTOPLAY: &str = "MIRRA_AUTOPLAY";
const ENV_TOAST: &str = "MIRRA_TOAST_MS";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where the configuration's highest-priority value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[carousel]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselToml {
    /// Autoplay interval in milliseconds
    pub interval_ms: Option<u64>,
    /// Whether the carousel advances on its own
    pub autoplay: Option<bool>,
}

/// `[chat]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatToml {
    /// Delay before the stylist answers, in milliseconds
    pub reply_delay_ms: Option<u64>,
    /// First message in the transcript
    pub greeting: Option<String>,
    /// The stylist's canned answer
    pub scripted_reply: Option<String>,
}

/// `[upload]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadToml {
    /// Largest accepted photo in bytes
    pub max_bytes: Option<u64>,
}

/// `[display]` section
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// How long a toast stays on screen, in milliseconds
    pub toast_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomToml {
    /// Carousel section
    pub carousel: CarouselToml,
    /// Chat section
    pub chat: ChatToml,
    /// Upload section
    pub upload: UploadToml,
    /// Display section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved showroom configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShowroomConfig {
    /// Time between carousel autoplay advances
    pub carousel_interval: Duration,
    /// Whether the carousel advances on its own
    pub autoplay: bool,
    /// Delay before a stylist reply is appended
    pub reply_delay: Duration,
    /// Largest accepted photo in bytes
    pub max_upload_bytes: u64,
    /// Toast display time
    pub toast_duration: Duration,
    /// Seeded greeting
    pub greeting: String,
    /// Canned stylist reply
    pub scripted_reply: String,
    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            carousel_interval: Duration::from_millis(3000),
            autoplay: true,
            reply_delay: Duration::from_millis(1000),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            toast_duration: Duration::from_secs(4),
            greeting: GREETING.to_string(),
            scripted_reply: SCRIPTED_REPLY.to_string(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl ShowroomConfig {
    /// Configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest-priority source that contributed a value
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Autoplay interval if autoplay is on
    #[must_use]
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay.then_some(self.carousel_interval)
    }

    /// Reject values the showroom cannot run with
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValidationError`] for a zero carousel interval or a zero
    /// upload limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel_interval.is_zero() {
            return Err(ConfigError::ValidationError(
                "carousel interval must be greater than zero".into(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "upload limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/mirra/showroom.toml` or
/// `~/.config/mirra/showroom.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("mirra").join("showroom.toml"))
}

/// Load configuration from the default path, the environment and defaults
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if
/// the resulting values are invalid. A missing file is not an error.
pub fn load_config() -> Result<ShowroomConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// If `path` is `None`, only defaults and environment variables are used.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// resulting values are invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ShowroomConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Load configuration, resolving environment variables through `env`
///
/// # Errors
///
/// Same as [`load_config_from_path`].
pub fn load_config_with_env(
    path: Option<PathBuf>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ShowroomConfig, ConfigError> {
    let mut config = ShowroomConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ShowroomToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, env);
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut ShowroomConfig, toml: &ShowroomToml) {
    if let Some(ms) = toml.carousel.interval_ms {
        config.carousel_interval = Duration::from_millis(ms);
    }
    if let Some(autoplay) = toml.carousel.autoplay {
        config.autoplay = autoplay;
    }

    if let Some(ms) = toml.chat.reply_delay_ms {
        config.reply_delay = Duration::from_millis(ms);
    }
    if let Some(greeting) = &toml.chat.greeting {
        config.greeting.clone_from(greeting);
    }
    if let Some(reply) = &toml.chat.scripted_reply {
        config.scripted_reply.clone_from(reply);
    }

    if let Some(bytes) = toml.upload.max_bytes {
        config.max_upload_bytes = bytes;
    }

    if let Some(ms) = toml.display.toast_ms {
        config.toast_duration = Duration::from_millis(ms);
    }
}

fn parse_env<T: std::str::FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

fn apply_env_config(config: &mut ShowroomConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(ms) = parse_env::<u64>(&env, ENV_CAROUSEL_INTERVAL) {
        config.carousel_interval = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&env, ENV_REPLY_DELAY) {
        config.reply_delay = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(bytes) = parse_env::<u64>(&env, ENV_MAX_UPLOAD) {
        config.max_upload_bytes = bytes;
        config.source = ConfigSource::Env;
    }
    if let Some(autoplay) = env(ENV_AUTOPLAY) {
        config.autoplay = autoplay != "0" && autoplay.to_lowercase() != "false";
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64>(&env, ENV_TOAST) {
        config.toast_duration = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// CLI overrides, applied after [`load_config`]
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Carousel interval override (milliseconds)
    pub carousel_interval_ms: Option<u64>,

    /// Autoplay override
    pub autoplay: Option<bool>,

    /// Reply delay override (milliseconds)
    pub reply_delay_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set carousel interval override
    #[must_use]
    pub fn with_carousel_interval_ms(mut self, ms: u64) -> Self {
        self.carousel_interval_ms = Some(ms);
        self
    }

    /// Set autoplay override
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    /// Set reply delay override
    #[must_use]
    pub fn with_reply_delay_ms(mut self, ms: u64) -> Self {
        self.reply_delay_ms = Some(ms);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carousel_interval_ms.is_none() && self.autoplay.is_none() && self.reply_delay_ms.is_none()
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// [`ConfigError::ValidationError`] if an override makes the
    /// configuration invalid.
    pub fn apply(&self, config: &mut ShowroomConfig) -> Result<(), ConfigError> {
        if let Some(ms) = self.carousel_interval_ms {
            config.carousel_interval = Duration::from_millis(ms);
        }
        if let Some(autoplay) = self.autoplay {
            config.autoplay = autoplay;
        }
        if let Some(ms) = self.reply_delay_ms {
            config.reply_delay = Duration::from_millis(ms);
        }
        if !self.is_empty() {
            config.source = ConfigSource::Cli;
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn test_default_config() {
        let config = ShowroomConfig::default();

        assert_eq!(config.carousel_interval, Duration::from_millis(3000));
        assert_eq!(config.reply_delay, Duration::from_millis(1000));
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.autoplay);
        assert_eq!(config.toast_duration, Duration::from_secs(4));
        assert_eq!(config.greeting, GREETING);
        assert_eq!(config.source(), ConfigSource::Default);
        assert_eq!(config.autoplay_interval(), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_default_config_path() {
        if let Some(p) = default_config_path() {
            assert!(p.ends_with("mirra/showroom.toml"));
        }
    }

    // =========================================================================
    // TOML
    // =========================================================================

    #[test]
    fn test_parse_valid_toml() {
        let file = toml_file(
            r#"
[carousel]
interval_ms = 5000
autoplay = false

[chat]
reply_delay_ms = 250
scripted_reply = "Try the denim."

[upload]
max_bytes = 1024

[display]
toast_ms = 1500
"#,
        );

        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();

        assert_eq!(config.carousel_interval, Duration::from_millis(5000));
        assert!(!config.autoplay);
        assert_eq!(config.autoplay_interval(), None);
        assert_eq!(config.reply_delay, Duration::from_millis(250));
        assert_eq!(config.scripted_reply, "Try the denim.");
        assert_eq!(config.greeting, GREETING, "unset keys keep defaults");
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_empty_toml_is_defaults() {
        let file = toml_file("");
        let config = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap();
        assert_eq!(config.carousel_interval, ShowroomConfig::default().carousel_interval);
        assert_eq!(config.source(), ConfigSource::File);
    }

    #[test]
    fn test_missing_file_graceful() {
        let path = PathBuf::from("/nonexistent/mirra/showroom.toml");
        let config = load_config_with_env(Some(path), no_env).unwrap();
        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_malformed_toml_error() {
        let file = toml_file("[carousel\ninterval_ms = ");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let file = toml_file("[carousel]\ninterval_ms = \"fast\"\n");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let original = ShowroomToml {
            carousel: CarouselToml {
                interval_ms: Some(1200),
                autoplay: Some(true),
            },
            upload: UploadToml {
                max_bytes: Some(2048),
            },
            ..ShowroomToml::default()
        };
        let text = toml::to_string(&original).unwrap();
        let parsed: ShowroomToml = toml::from_str(&text).unwrap();
        assert_eq!(parsed.carousel.interval_ms, Some(1200));
        assert_eq!(parsed.upload.max_bytes, Some(2048));
        assert!(parsed.chat.greeting.is_none());
    }

    // =========================================================================
    // Environment and CLI precedence
    // =========================================================================

    #[test]
    fn test_env_overrides_file() {
        let file = toml_file("[carousel]\ninterval_ms = 5000\n[chat]\nreply_delay_ms = 200\n");
        let env = env_of(&[(ENV_CAROUSEL_INTERVAL, "800"), (ENV_AUTOPLAY, "false")]);

        let config = load_config_with_env(Some(file.path().to_path_buf()), env).unwrap();

        assert_eq!(config.carousel_interval, Duration::from_millis(800));
        assert!(!config.autoplay);
        assert_eq!(config.reply_delay, Duration::from_millis(200), "file value kept");
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_unparseable_env_is_ignored() {
        let env = env_of(&[(ENV_REPLY_DELAY, "soon"), (ENV_TOAST, " 900 ")]);
        let config = load_config_with_env(None, env).unwrap();
        assert_eq!(config.reply_delay, Duration::from_millis(1000));
        assert_eq!(config.toast_duration, Duration::from_millis(900));
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_of(&[(ENV_REPLY_DELAY, "300")]);
        let mut config = load_config_with_env(None, env).unwrap();

        ConfigOverrides::new()
            .with_reply_delay_ms(50)
            .with_autoplay(false)
            .apply(&mut config)
            .unwrap();

        assert_eq!(config.reply_delay, Duration::from_millis(50));
        assert!(!config.autoplay);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_empty_overrides_no_change() {
        let mut config = ShowroomConfig::default();
        ConfigOverrides::new().apply(&mut config).unwrap();
        assert_eq!(config, ShowroomConfig::default());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn test_zero_values_rejected() {
        let file = toml_file("[upload]\nmax_bytes = 0\n");
        let err = load_config_with_env(Some(file.path().to_path_buf()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));

        let env = env_of(&[(ENV_CAROUSEL_INTERVAL, "0")]);
        assert!(load_config_with_env(None, env).is_err());

        let mut config = ShowroomConfig::default();
        let err = ConfigOverrides::new()
            .with_carousel_interval_ms(0)
            .apply(&mut config)
            .unwrap_err();
        assert!(err.to_string().contains("carousel interval"));
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
        assert_eq!(ConfigSource::Default.to_string(), "default");
    }
}
