// ── Core error types ──
//
// User-facing errors from learnhub-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<learnhub_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("cannot reach the LearnHub backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("session expired -- sign in again")]
    SessionExpired,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("course not found: {identifier}")]
    CourseNotFound { identifier: String },

    #[error("no active subscription on this account")]
    NoSubscription,

    // ── Operation errors ─────────────────────────────────────────────
    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("backend error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<learnhub_api::Error> for CoreError {
    fn from(err: learnhub_api::Error) -> Self {
        match err {
            learnhub_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            learnhub_api::Error::SessionExpired => CoreError::SessionExpired,
            learnhub_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            learnhub_api::Error::InvalidUrl(e) => CoreError::ValidationFailed {
                message: format!("invalid URL: {e}"),
            },
            learnhub_api::Error::Api { message, status } => CoreError::Api { message, status },
            learnhub_api::Error::Deserialization { message, .. } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
