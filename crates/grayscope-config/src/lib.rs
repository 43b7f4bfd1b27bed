//! Configuration for the grayscope CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `grayscope_core::FetchConfig`. The core treats
//! credentials as opaque strings; everything about where they come
//! from lives here.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use grayscope_core::{FetchConfig, SourceWeighting, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named Graylog server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Default display period (short form, e.g. "24h").
    #[serde(default = "default_range")]
    pub range: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
            limit: default_limit(),
            range: default_range(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    15
}
fn default_limit() -> u32 {
    1000
}
fn default_range() -> String {
    "24h".into()
}

/// A named Graylog server profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "http://192.168.10.239:9000").
    pub server: String,

    /// Username for HTTP Basic auth.
    pub username: Option<String>,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Full-text query override (default `*`).
    pub query: Option<String>,

    /// Name of a numeric record field to weight category percentages
    /// by, instead of message count.
    pub volume_field: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override search result cap.
    pub limit: Option<u32>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "grayscope", "grayscope").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("grayscope");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from a specific TOML file + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GRAYSCOPE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve Basic-auth credentials for a profile.
///
/// Password source order: profile's `password_env` → `GRAYSCOPE_PASSWORD`
/// → system keyring → plaintext in config.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("GRAYSCOPE_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 2. Well-known env var
    if let Ok(pw) = std::env::var("GRAYSCOPE_PASSWORD") {
        return Ok((username, SecretString::from(pw)));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("grayscope", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Profile → FetchConfig ───────────────────────────────────────────

/// Build a `FetchConfig` from a profile, applying global defaults.
pub fn profile_to_fetch_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<FetchConfig, ConfigError> {
    let base_url: url::Url = profile.server.parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {}", profile.server),
    })?;

    let (username, password) = resolve_credentials(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let weighting = profile
        .volume_field
        .clone()
        .map_or(SourceWeighting::MessageCount, SourceWeighting::VolumeField);

    Ok(FetchConfig {
        base_url,
        username,
        password,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        limit: profile.limit.unwrap_or(defaults.limit),
        query: profile.query.clone().unwrap_or_else(|| "*".into()),
        weighting,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn profile() -> Profile {
        Profile {
            server: "http://192.168.10.239:9000".into(),
            username: Some("administrator".into()),
            password: Some("hunter2".into()),
            ..Profile::default()
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let d = Defaults::default();
        assert_eq!(d.output, "table");
        assert_eq!(d.timeout, 15);
        assert_eq!(d.limit, 1000);
        assert_eq!(d.range, "24h");
        assert!(!d.insecure);
    }

    #[test]
    fn profile_builds_fetch_config() {
        let cfg = profile_to_fetch_config(&profile(), "default", &Defaults::default()).unwrap();

        assert_eq!(cfg.base_url.as_str(), "http://192.168.10.239:9000/");
        assert_eq!(cfg.username, "administrator");
        assert_eq!(cfg.timeout, Duration::from_secs(15));
        assert_eq!(cfg.limit, 1000);
        assert_eq!(cfg.query, "*");
        assert_eq!(cfg.weighting, SourceWeighting::MessageCount);
    }

    #[test]
    fn volume_field_selects_volume_weighting() {
        let mut p = profile();
        p.volume_field = Some("traffic_volume".into());

        let cfg = profile_to_fetch_config(&p, "default", &Defaults::default()).unwrap();
        assert_eq!(
            cfg.weighting,
            SourceWeighting::VolumeField("traffic_volume".into())
        );
    }

    #[test]
    fn invalid_server_url_is_a_validation_error() {
        let mut p = profile();
        p.server = "not a url".into();

        let result = profile_to_fetch_config(&p, "default", &Defaults::default());
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server"
        ));
    }

    #[test]
    fn missing_username_is_no_credentials() {
        let p = Profile {
            server: "http://localhost:9000".into(),
            ..Profile::default()
        };

        // GRAYSCOPE_USERNAME is not set in the test environment.
        let result = resolve_credentials(&p, "default");
        assert!(matches!(result, Err(ConfigError::NoCredentials { .. })));
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.defaults.limit = 500;
        cfg.profiles.insert("home".into(), profile());
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.default_profile.as_deref(), Some("default"));
        assert_eq!(loaded.defaults.limit, 500);
        assert_eq!(loaded.profiles["home"].server, "http://192.168.10.239:9000");
        assert_eq!(loaded.profiles["home"].username.as_deref(), Some("administrator"));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert("home".into(), profile());

        let rendered = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();

        assert_eq!(parsed.default_profile.as_deref(), Some("default"));
        assert_eq!(parsed.profiles["home"].server, "http://192.168.10.239:9000");
    }
}
