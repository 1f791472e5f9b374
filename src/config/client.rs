//! HTTP client configuration.

use crate::config::keys::ApiKey;
use crate::config::poll::PollConfig;

use std::time::Duration;

/// Base URL of the MetaDefender Cloud v4 API.
pub const DEFAULT_BASE_URL: &str = "https://api.metadefender.com/v4";

/// Configuration for a MetaDefender client.
///
/// # Example
///
/// ```rust
/// use metascan::config::{ApiKey, ClientConfig, PollConfig};
/// use std::time::Duration;
///
/// let key = ApiKey::new("your-api-key").unwrap();
/// let config = ClientConfig::new(key)
///     .with_request_timeout(Duration::from_secs(30))
///     .with_poll(PollConfig::unbounded().with_interval(Duration::from_secs(1)));
/// assert_eq!(config.base_url, "https://api.metadefender.com/v4");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as the `apikey` header.
    pub api_key: ApiKey,

    /// Base URL for the API, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout; `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Polling behavior while waiting for an uploaded scan.
    pub poll: PollConfig,
}

impl ClientConfig {
    /// Creates a configuration with the given key and default settings.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            poll: PollConfig::default(),
        }
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Sets the polling behavior.
    pub fn with_poll(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }
}
