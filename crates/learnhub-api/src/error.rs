// Transport-layer error types.
//
// Everything the backend can throw at us, classified. Consumers in
// `learnhub-core` translate these into domain-appropriate variants --
// nothing above this crate should branch on HTTP status codes.

use thiserror::Error;

/// Errors produced by the LearnHub API client.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure: DNS, connect, TLS, timeout.
    #[error("HTTP transport error: {0}")]
    Transport(reqwest::Error),

    /// The base URL or a constructed endpoint URL is not valid.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The backend rejected our credentials (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// A previously valid session token is no longer accepted.
    #[error("session expired -- re-authentication required")]
    SessionExpired,

    /// The backend answered, but with `success: false` or a non-2xx status.
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status, if the failure came with one.
        status: Option<u16>,
    },

    /// The response body did not match the expected wire shape.
    #[error("failed to decode response: {message}")]
    Deserialization {
        message: String,
        /// Raw body, retained for diagnostics.
        body: String,
    },
}
