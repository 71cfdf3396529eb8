//! Client configuration.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use todo_client::ClientConfig;
//!
//! // Use defaults (local development server)
//! let config = ClientConfig::default();
//! assert_eq!(config.base_url, "http://localhost:8008");
//!
//! // Or customize
//! let config = ClientConfig::new("https://tasks.example.com")
//!     .with_timeout(Duration::from_secs(10));
//! assert!(config.validate().is_ok());
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::crypto::NONCE_LENGTH;
use crate::ClientError;

/// Default API location, matching the stock server listener.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8008";

pub const ENV_BASE_URL: &str = "TODO_CLIENT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TODO_CLIENT_TIMEOUT_SECS";

/// Settings for talking to the task API.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Scheme, host and port of the API, without a trailing slash.
    ///
    /// Default: `http://localhost:8008`
    pub base_url: String,

    /// Length of the per-request nonce.
    ///
    /// Default: 16. Shorter nonces are rejected by [`validate`](Self::validate).
    pub nonce_length: usize,

    /// Per-request timeout. `None` waits for the transport to fail on its own.
    ///
    /// Default: none
    pub request_timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            nonce_length: NONCE_LENGTH,
            request_timeout: None,
            user_agent: concat!("todo-client/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// On-disk shape of the configuration; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct FileConfig {
    base_url: Option<String>,
    nonce_length: Option<usize>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

impl ClientConfig {
    /// Creates a configuration for the given API location.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Sets the API location. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_nonce_length(mut self, length: usize) -> Self {
        self.nonce_length = length;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Reads `TODO_CLIENT_BASE_URL` and `TODO_CLIENT_TIMEOUT_SECS`, falling
    /// back to defaults for unset variables.
    ///
    /// # Errors
    /// Returns `ClientError::ConfigurationError` if a variable is malformed or
    /// the result fails validation.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ClientError::ConfigurationError(format!(
                    "{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {secs:?}"
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file. Missing keys keep their defaults.
    ///
    /// ```json
    /// { "base_url": "https://tasks.example.com", "request_timeout_secs": 10 }
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to read {}: {e}", path.display()))
        })?;
        let file: FileConfig = serde_json::from_str(&content).map_err(|e| {
            ClientError::ConfigurationError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        let mut config = Self::default();
        if let Some(url) = file.base_url {
            config = config.with_base_url(url);
        }
        if let Some(length) = file.nonce_length {
            config.nonce_length = length;
        }
        if let Some(secs) = file.request_timeout_secs {
            config.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(user_agent) = file.user_agent {
            config.user_agent = user_agent;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the client cannot work with.
    pub fn validate(&self) -> Result<(), ClientError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::ConfigurationError(format!(
                "base_url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.nonce_length < NONCE_LENGTH {
            return Err(ClientError::ConfigurationError(format!(
                "nonce_length must be at least {NONCE_LENGTH}, got {}",
                self.nonce_length
            )));
        }
        Ok(())
    }

    /// Joins an API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
