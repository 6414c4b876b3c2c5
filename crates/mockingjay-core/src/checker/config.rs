//! HTTP client configuration for compatibility checks.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Settings of the HTTP client issuing the real requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Total time allowed for one request, including reading the body
    pub timeout: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CheckerConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build_client(&self) -> Result<Client, CheckerError> {
        Ok(Client::builder().timeout(self.timeout).build()?)
    }
}
