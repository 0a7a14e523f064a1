use std::time::Duration;

use crate::error::Error;

/// Connection tuning for the underlying `reqwest::Client`.
///
/// Carries no credentials -- those live in [`crate::Session`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (staging backends).
    pub accept_invalid_certs: bool,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            user_agent: concat!("learnhub/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this configuration.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(Error::Transport)
    }
}
