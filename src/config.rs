use std::time::Duration;

use crate::error::Error;

pub const ENV_SEARCH_URL: &str = "TAXIS_SEARCH_URL";
pub const ENV_SEARCH_TOKEN: &str = "TAXIS_SEARCH_TOKEN";
pub const ENV_SEARCH_TIMEOUT_MS: &str = "TAXIS_SEARCH_TIMEOUT_MS";

/// Where and how the search client talks to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    /// Applied by the HTTP transport only; `None` leaves the client default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            timeout: None,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reads `TAXIS_SEARCH_URL` (required), `TAXIS_SEARCH_TOKEN` and
    /// `TAXIS_SEARCH_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_SEARCH_URL)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{} is not set", ENV_SEARCH_URL)))?;

        let mut config = Self::new(base_url);
        if let Some(token) = lookup(ENV_SEARCH_TOKEN).filter(|t| !t.is_empty()) {
            config = config.with_bearer_token(token);
        }
        if let Some(raw) = lookup(ENV_SEARCH_TIMEOUT_MS) {
            let millis = raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("{} must be a number of milliseconds", ENV_SEARCH_TIMEOUT_MS))
            })?;
            config = config.with_timeout(Duration::from_millis(millis));
        }
        Ok(config)
    }

    /// Joins the base URL and an endpoint path with exactly one `/`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, path)
        }
    }
}
