//! Configuration handling for docsift.
//!
//! Settings are read from `config.toml` in the platform config directory
//! (override with `DOCSIFT_CONFIG_DIR`) or from the file given by `--config`.
//! Every field has a default, so a partial file is valid.

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use docsift_core::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, ExtractionOptions, FetchConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shown in place of secrets.
pub const REDACTED: &str = "********";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Outbound HTTP configuration
    #[serde(default)]
    pub fetch: FetchSection,

    /// Default extraction options
    #[serde(default)]
    pub extraction: ExtractionSection,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Outbound HTTP configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchSection {
    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirect hops per request
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Bearer token for generic downloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

fn default_user_agent() -> String {
    FetchConfig::default().user_agent
}

impl Default for FetchSection {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            auth_token: None,
        }
    }
}

/// Default extraction options, overridable per command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionSection {
    /// Normalise whitespace and punctuation spacing
    #[serde(default)]
    pub cleanup_text: bool,

    /// Truncate output text to this many characters (0 = unlimited)
    #[serde(default)]
    pub max_text_length: usize,

    /// Include format metadata in the output
    #[serde(default = "default_extract_metadata")]
    pub extract_metadata: bool,
}

fn default_extract_metadata() -> bool {
    true
}

impl Default for ExtractionSection {
    fn default() -> Self {
        Self {
            cleanup_text: false,
            max_text_length: 0,
            extract_metadata: default_extract_metadata(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load from `explicit` when given, else from the default location.
    /// A missing default file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default config file location.
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            bail!("fetch.timeout_secs must be greater than zero");
        }
        if self.logging.level.parse::<tracing::Level>().is_err() {
            bail!("logging.level {:?} is not a valid level", self.logging.level);
        }
        Ok(())
    }

    /// HTTP settings for the extraction pipeline.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout_secs: self.fetch.timeout_secs,
            max_redirects: self.fetch.max_redirects,
            user_agent: self.fetch.user_agent.clone(),
            auth_token: self.fetch.auth_token.clone(),
        }
    }

    /// Extraction options before command-line overrides.
    pub fn extraction_options(&self) -> ExtractionOptions {
        ExtractionOptions {
            cleanup_text: self.extraction.cleanup_text,
            max_text_length: self.extraction.max_text_length,
            extract_metadata: self.extraction.extract_metadata,
        }
    }

    /// Copy safe to print, with the auth token masked.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.fetch.auth_token.is_some() {
            config.fetch.auth_token = Some(REDACTED.to_string());
        }
        config
    }

    /// Commented sample configuration file.
    pub fn sample_toml() -> &'static str {
        r#"# docsift configuration

[fetch]
# Per-request timeout in seconds
timeout_secs = 30
# Maximum redirect hops per request
max_redirects = 10
# user_agent = "docsift/0.1.0"
# Bearer token sent with generic downloads (never with public-link providers)
# auth_token = "..."

[extraction]
# Collapse whitespace and fix punctuation spacing
cleanup_text = false
# Truncate text to this many characters, 0 = unlimited
max_text_length = 0
# Include format metadata (pages, paragraphs, title, ...) in the output
extract_metadata = true

[logging]
# trace, debug, info, warn or error
level = "info"
# file = "/var/log/docsift.log"
"#
    }
}

/// Get the config directory for docsift.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("DOCSIFT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }

    ProjectDirs::from("", "", "docsift").map(|dirs| dirs.config_dir().to_path_buf())
}
