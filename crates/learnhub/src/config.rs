//! CLI configuration — thin wrapper around `learnhub_config` shared
//! types, plus resolution that respects `GlobalOpts` flag overrides
//! (--server, --token, --anonymous, ...). Flags beat environment beats
//! profile file.

use std::time::Duration;

use learnhub_core::{PortalConfig, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use learnhub_config::{
    Config, Profile, config_path, forget_session_token, load_config_or_default, save_config,
    store_session_token,
};

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Translate profile + global flags into a [`PortalConfig`].
///
/// `needs_session` marks commands that read per-user data (orders,
/// access, renewals); catalog-only commands quietly fall back to an
/// anonymous session when no token is available.
pub fn resolve_portal_config(
    global: &GlobalOpts,
    needs_session: bool,
) -> Result<PortalConfig, CliError> {
    let config = load_config_or_default();
    let profile_name = active_profile_name(global, &config);
    let profile = config.profile(&profile_name).ok();

    // 1. Server URL (flag > env > profile)
    let server_str = global
        .server
        .clone()
        .or_else(|| profile.map(|p| p.server.clone()))
        .ok_or_else(|| CliError::Usage {
            message: format!("no backend configured for profile '{profile_name}'"),
            help: "run `learnhub config init --server <URL>` or pass --server".into(),
        })?;
    let server: url::Url = server_str
        .parse()
        .map_err(|_| CliError::validation("server", format!("invalid URL: {server_str}")))?;

    // 2. Session (--anonymous > --token/env > keyring)
    let session = if global.anonymous {
        Session::Anonymous
    } else if let Some(token) = &global.token {
        Session::bearer(token.clone())
    } else {
        match learnhub_config::resolve_session_token(&profile_name) {
            Ok(token) => {
                use secrecy::ExposeSecret;
                Session::bearer(token.expose_secret())
            }
            Err(err) if needs_session => return Err(err.into()),
            Err(_) => Session::Anonymous,
        }
    };

    // 3. Tuning (flags > profile > defaults)
    let timeout = profile
        .and_then(|p| p.timeout_secs)
        .map_or(Duration::from_secs(global.timeout), Duration::from_secs);
    let insecure = global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false);
    let refresh_interval_secs = profile.and_then(|p| p.refresh_interval_secs).unwrap_or(300);

    let mut portal = PortalConfig::new(server, session);
    portal.timeout = timeout;
    portal.accept_invalid_certs = insecure;
    portal.refresh_interval_secs = refresh_interval_secs;

    tracing::debug!(profile = %profile_name, server = %portal.server, "resolved portal config");
    Ok(portal)
}
