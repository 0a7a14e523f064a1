//! On-disk configuration for LearnHub tools.
//!
//! Profiles live in a single TOML file (`~/.config/learnhub/config.toml`
//! on Linux), loaded through figment with a `LEARNHUB_*` environment
//! overlay. Session tokens never go into that file: they live in the OS
//! keyring, with a `LEARNHUB_TOKEN` env-var fallback for CI and
//! containers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Keyring service name under which tokens are stored.
const KEYRING_SERVICE: &str = "learnhub";

/// Environment variable consulted when the keyring has no token.
const TOKEN_ENV_VAR: &str = "LEARNHUB_TOKEN";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine a config directory on this platform")]
    NoConfigDir,

    #[error("failed to read config: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("failed to write config to {path}: {source}")]
    Save {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no profile named '{name}' (run `learnhub config init` first)")]
    UnknownProfile { name: String },

    #[error(
        "no session token for profile '{profile}': store one with \
         `learnhub config set-token` or export {TOKEN_ENV_VAR}"
    )]
    MissingToken { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

// ── Types ───────────────────────────────────────────────────────────

/// One named backend connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    /// Backend root URL, e.g. `https://api.learnhub.io`.
    pub server: String,
    /// Accept self-signed certificates (staging backends).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    /// Background refresh interval in seconds; `0` disables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// The whole config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

// ── Loading & saving ────────────────────────────────────────────────

/// Default config file path: `<config dir>/learnhub/config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("io", "learnhub", "learnhub")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Load config from `path`, overlaying `LEARNHUB_*` environment
/// variables. A missing file yields the default (empty) config.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("LEARNHUB_").ignore(&["token"]))
        .extract()
        .map_err(|e| ConfigError::Load(Box::new(e)))
}

/// Load from the default path, or fall back to an empty config.
pub fn load_config_or_default() -> Config {
    config_path()
        .ok()
        .and_then(|path| load_config(&path).ok())
        .unwrap_or_default()
}

/// Serialize `config` to `path`, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let rendered = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Save {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, rendered).map_err(|source| ConfigError::Save {
        path: path.to_path_buf(),
        source,
    })
}

// ── Session tokens ──────────────────────────────────────────────────

/// Resolve the session token for `profile`: keyring first, then the
/// `LEARNHUB_TOKEN` environment variable.
///
/// A keyring that is unreachable (headless session, no secret service)
/// counts the same as an empty one; the env var is the fallback either
/// way, and only a missing token everywhere is an error.
pub fn resolve_session_token(profile: &str) -> Result<SecretString, ConfigError> {
    if let Ok(token) = keyring::Entry::new(KEYRING_SERVICE, profile)
        .and_then(|entry| entry.get_password())
    {
        return Ok(SecretString::from(token));
    }

    std::env::var(TOKEN_ENV_VAR)
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingToken {
            profile: profile.into(),
        })
}

/// Store a session token for `profile` in the OS keyring.
pub fn store_session_token(profile: &str, token: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, profile)?.set_password(token)?;
    Ok(())
}

/// Remove a stored session token. Missing entries are not an error.
pub fn forget_session_token(profile: &str) -> Result<(), ConfigError> {
    match keyring::Entry::new(KEYRING_SERVICE, profile).and_then(|entry| entry.delete_credential())
    {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "prod".to_owned(),
            Profile {
                server: "https://api.learnhub.io".into(),
                insecure: None,
                refresh_interval_secs: Some(300),
                timeout_secs: None,
            },
        );
        Config {
            default_profile: Some("prod".into()),
            profiles,
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = sample_config();
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(&dir.path().join("does-not-exist.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn unknown_profile_is_a_typed_error() {
        let config = sample_config();
        assert!(config.profile("prod").is_ok());
        assert!(matches!(
            config.profile("staging"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn profile_toml_shape() {
        let rendered = toml::to_string_pretty(&sample_config()).unwrap();
        assert!(rendered.contains("default_profile = \"prod\""));
        assert!(rendered.contains("[profiles.prod]"));
        assert!(rendered.contains("server = \"https://api.learnhub.io\""));
    }
}
