use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError, FeedOrdering};
use reqwest::Url;
use std::path::Path;

/// REST prefix shared by every endpoint
const API_PREFIX: &str = "/api/v1";

/// Client-side view of the configuration: URL construction for REST and the
/// realtime endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    app: AppConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve defaults, config file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self { app: AppConfig::load()? })
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        Ok(Self { app: builder.build()? })
    }

    /// Shorthand used by tests and tools pointing at a local backend
    pub fn for_backend(url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_builder(AppConfig::builder().backend_url(url))
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Get the full URL for an API endpoint, e.g. `/bars` → `{backend}/api/v1/bars`
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.server_url(), API_PREFIX, path)
    }

    pub fn server_url(&self) -> &str {
        &self.app.backend_url
    }

    pub fn session_file(&self) -> &Path {
        &self.app.session_file
    }

    pub fn feed_ordering(&self) -> FeedOrdering {
        self.app.feed_ordering
    }

    /// Websocket URL of the realtime endpoint, authenticated by `token`
    pub fn cable_url(&self, token: &str) -> Result<String, ConfigError> {
        let mut url = Url::parse(self.server_url())
            .map_err(|_| ConfigError::InvalidUrl(self.server_url().to_string()))?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| ConfigError::InvalidUrl(self.server_url().to_string()))?;
        url.set_path(&self.app.cable_path);
        url.query_pairs_mut().clear().append_pair("token", token);
        Ok(url.to_string())
    }
}
