// Backend HTTP client
//
// Wraps `reqwest::Client` with LearnHub URL construction and envelope
// unwrapping. Endpoint groups (orders, catalog, live classes) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::Envelope;
use crate::session::Session;
use crate::transport::TransportConfig;

/// HTTP client for the LearnHub backend.
///
/// Handles the `{ success, message, data }` envelope and bearer-token
/// auth. All methods return the unwrapped `data` payload -- the envelope
/// is stripped before the caller sees it, and `success: false` surfaces
/// as [`Error::Api`], never as an empty result.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    /// Create a client from a [`TransportConfig`].
    ///
    /// `base_url` is the backend root, e.g. `https://api.learnhub.io`.
    pub fn new(base_url: Url, session: Session, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Session) -> Self {
        Self {
            http,
            base_url,
            session,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the response envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {url}");

        let builder = self.session.apply(self.http.get(url));
        let resp = builder.send().await.map_err(Error::Transport)?;

        self.parse_envelope(resp).await
    }

    /// Parse the `{ success, message, data }` envelope, returning `data`
    /// on success or a typed error otherwise.
    async fn parse_envelope<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(if self.session.is_anonymous() {
                Error::Authentication {
                    message: "this endpoint requires a signed-in session".into(),
                }
            } else {
                Error::SessionExpired
            });
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                message: "insufficient permissions (HTTP 403)".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                message: format!("HTTP {status}: {}", &body[..body.len().min(200)]),
                status: Some(status.as_u16()),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if !envelope.success {
            return Err(Error::Api {
                message: envelope
                    .message
                    .unwrap_or_else(|| "backend reported failure without a message".into()),
                status: Some(status.as_u16()),
            });
        }

        envelope.data.ok_or_else(|| Error::Deserialization {
            message: "envelope reported success but carried no data".into(),
            body,
        })
    }
}
