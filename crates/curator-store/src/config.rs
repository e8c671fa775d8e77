//! # Store Client Configuration
//!
//! Connection surface for the remote store: base URL, API key, User-Agent,
//! and request timeout. Loadable from environment variables; the `Debug`
//! implementation redacts the API key so it cannot leak into log output.

use thiserror::Error;
use url::Url;

/// Configuration for connecting to the remote object store.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store (scheme + host, no path).
    pub site_url: Url,
    /// API key sent with every publish call.
    pub api_key: String,
    /// User-Agent header identifying this validator.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("site_url", &self.site_url)
            .field("api_key", &"[REDACTED]")
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CURATOR_SITE_URL` (required)
    /// - `CURATOR_API_KEY` (required)
    /// - `CURATOR_USER_AGENT` (default: `curator`)
    /// - `CURATOR_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let site_url = std::env::var("CURATOR_SITE_URL").map_err(|_| ConfigError::MissingSiteUrl)?;
        let site_url = parse_site_url(&site_url)?;
        let api_key = std::env::var("CURATOR_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;

        Ok(Self {
            site_url,
            api_key,
            user_agent: std::env::var("CURATOR_USER_AGENT").unwrap_or_else(|_| "curator".into()),
            timeout_secs: std::env::var("CURATOR_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// A configuration pointing at an arbitrary base URL (tests point this
    /// at a local mock server).
    pub fn for_site(site_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            site_url,
            api_key: api_key.into(),
            user_agent: "curator".into(),
            timeout_secs: 30,
        }
    }
}

/// The site URL must be a bare origin: no path, query, or fragment.
fn parse_site_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidSiteUrl {
        raw: raw.to_string(),
        reason: source.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidSiteUrl {
            raw: raw.to_string(),
            reason: "URL must be complete".to_string(),
        });
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidSiteUrl {
            raw: raw.to_string(),
            reason: "URL must not carry a path, query, or fragment".to_string(),
        });
    }
    Ok(url)
}

/// Error building a [`StoreConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `CURATOR_SITE_URL` is not set.
    #[error("CURATOR_SITE_URL environment variable is required")]
    MissingSiteUrl,

    /// `CURATOR_API_KEY` is not set.
    #[error("CURATOR_API_KEY environment variable is required")]
    MissingApiKey,

    /// The site URL could not be parsed or is not a bare origin.
    #[error("invalid site URL {raw:?}: {reason}")]
    InvalidSiteUrl { raw: String, reason: String },
}
