use secrecy::{ExposeSecret, SecretString};

/// Caller-supplied session state for API requests.
///
/// The backend authenticates with a bearer token issued at login. The
/// public catalog (courses, combos, live-class schedule) is readable
/// anonymously; order history requires a token. The session is always
/// constructed explicitly and passed in -- this crate never reads
/// ambient state.
#[derive(Debug, Clone)]
pub enum Session {
    /// No credentials. Catalog reads only.
    Anonymous,
    /// Bearer-token session for a signed-in user.
    Bearer { token: SecretString },
}

impl Session {
    /// Build a bearer session from a raw token string.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: SecretString::from(token.into()),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Apply the session's credentials to a request builder.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Anonymous => builder,
            Self::Bearer { token } => builder.bearer_auth(token.expose_secret()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_is_not_anonymous() {
        assert!(Session::Anonymous.is_anonymous());
        assert!(!Session::bearer("tok").is_anonymous());
    }
}
