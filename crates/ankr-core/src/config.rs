use std::fmt;
use std::time::Duration;

use crate::error::CoreError;
use crate::limiter::RateLimitBehavior;
use crate::rpc::RetryPolicy;

pub const DEFAULT_BASE_URL: &str = "https://rpc.ankr.com/multichain";

/// Everything needed to build an [`AnkrClient`](crate::AnkrClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Appended to the base URL as the final path segment. May be empty
    /// for the public, heavily throttled endpoint.
    pub api_key: String,
    pub base_url: String,
    /// Per-attempt HTTP timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Bucket size, and the number of calls allowed per `rate_window`.
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub on_rate_limit: RateLimitBehavior,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            rate_limit: 1_000,
            rate_window: Duration::from_secs(60),
            on_rate_limit: RateLimitBehavior::Block,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_rate_limit(
        mut self,
        limit: u32,
        window: Duration,
        behavior: RateLimitBehavior,
    ) -> Self {
        self.rate_limit = limit;
        self.rate_window = window;
        self.on_rate_limit = behavior;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), CoreError> {
        if self.timeout.is_zero() {
            return Err(CoreError::Config("timeout must be positive".to_owned()));
        }
        if self.retry.max_attempts == 0 {
            return Err(CoreError::Config(
                "retry.max_attempts must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<none>"
        } else {
            "<redacted>"
        };
        f.debug_struct("ClientConfig")
            .field("api_key", &api_key)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("rate_limit", &self.rate_limit)
            .field("rate_window", &self.rate_window)
            .field("on_rate_limit", &self.on_rate_limit)
            .field("retry", &self.retry)
            .finish()
    }
}
