//! Application configuration module
//!
//! `AppConfig` is resolved in layers: built-in defaults, then an optional
//! TOML file, then environment variables.
//!
//! ```toml
//! backend_url = "https://api.barhop.app"
//! cable_path = "/cable"
//! feed_ordering = "chronological"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Backend used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Mount point of the realtime endpoint on the backend
pub const DEFAULT_CABLE_PATH: &str = "/cable";

/// Directory name under the platform config dir
const APP_DIR: &str = "barhop";

/// How push events and fetched pages are combined in the feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrdering {
    /// De-duplicate by entry identity and keep newest `created_at` first
    #[default]
    Chronological,
    /// Prepend pushes, append pages, keep duplicates
    Arrival,
}

impl FromStr for FeedOrdering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chronological" => Ok(FeedOrdering::Chronological),
            "arrival" => Ok(FeedOrdering::Arrival),
            _ => Err(ConfigError::Parse(format!("unknown feed ordering '{}'", s.trim()))),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, without the `/api/v1` prefix
    pub backend_url: String,
    /// Path of the realtime endpoint
    pub cable_path: String,
    /// Where the session token and user id are persisted
    pub session_file: PathBuf,
    /// Feed merge policy
    pub feed_ordering: FeedOrdering,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            cable_path: DEFAULT_CABLE_PATH.to_string(),
            session_file: default_session_file(),
            feed_ordering: FeedOrdering::default(),
        }
    }
}

/// On-disk shape of the optional config file; every key may be omitted
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    backend_url: Option<String>,
    cable_path: Option<String>,
    session_file: Option<PathBuf>,
    feed_ordering: Option<FeedOrdering>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Defaults, then `<config_dir>/barhop/config.toml` if present, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = match default_config_file() {
            Some(path) if path.exists() => AppConfigBuilder::from_file(&path)?,
            _ => AppConfigBuilder::default(),
        };
        builder.with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend_url.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingValue("backend_url"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        if !self.cable_path.starts_with('/') {
            return Err(ConfigError::InvalidUrl(self.cable_path.clone()));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    backend_url: Option<String>,
    cable_path: Option<String>,
    session_file: Option<PathBuf>,
    feed_ordering: Option<FeedOrdering>,
}

impl AppConfigBuilder {
    /// Start from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&raw)
    }

    /// Start from TOML text
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let file: FileConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self {
            backend_url: file.backend_url,
            cable_path: file.cable_path,
            session_file: file.session_file,
            feed_ordering: file.feed_ordering,
        })
    }

    /// Overlay `BACKEND_URL` and `BARHOP_FEED_ORDERING`
    pub fn with_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(url) = std::env::var("BACKEND_URL") {
            if !url.trim().is_empty() {
                self.backend_url = Some(url);
            }
        }
        if let Ok(ordering) = std::env::var("BARHOP_FEED_ORDERING") {
            self.feed_ordering = Some(ordering.parse()?);
        }
        Ok(self)
    }

    /// Set the backend URL
    pub fn backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = Some(url.into());
        self
    }

    /// Set the realtime endpoint path
    pub fn cable_path(mut self, path: impl Into<String>) -> Self {
        self.cable_path = Some(path.into());
        self
    }

    /// Set the session file location
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Set the feed merge policy
    pub fn feed_ordering(mut self, ordering: FeedOrdering) -> Self {
        self.feed_ordering = Some(ordering);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            backend_url: self
                .backend_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            cable_path: self.cable_path.unwrap_or(defaults.cable_path),
            session_file: self.session_file.unwrap_or(defaults.session_file),
            feed_ordering: self.feed_ordering.unwrap_or(defaults.feed_ordering),
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
        .join("session.json")
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("could not read config: {0}")]
    Io(String),
    #[error("could not parse config: {0}")]
    Parse(String),
}
