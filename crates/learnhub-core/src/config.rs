// ── Runtime connection configuration ──
//
// Describes *how* to reach the LearnHub backend for one session. Carries
// credential data and tuning, but never touches disk -- the CLI builds a
// `PortalConfig` from its profile files and hands it in.

use std::time::Duration;

use url::Url;

use learnhub_api::Session;

/// Configuration for one connection to the backend.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Backend root URL (e.g. `https://api.learnhub.io`).
    pub server: Url,
    /// Explicit session; [`Session::Anonymous`] limits the portal to
    /// the public catalog.
    pub session: Session,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Accept self-signed certificates (staging backends).
    pub accept_invalid_certs: bool,
    /// How often the background refresh re-fetches everything, in
    /// seconds. `0` disables background refresh.
    pub refresh_interval_secs: u64,
}

impl PortalConfig {
    /// Sensible defaults around a server URL and session.
    pub fn new(server: Url, session: Session) -> Self {
        Self {
            server,
            session,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            refresh_interval_secs: 300,
        }
    }
}
