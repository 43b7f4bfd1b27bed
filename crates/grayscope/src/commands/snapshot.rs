//! `grayscope snapshot` — run one refresh cycle and print the result.

use std::time::Duration;

use secrecy::SecretString;

use grayscope_config as config;
use grayscope_core::{FetchConfig, Fetcher, SourceWeighting, StatusReporter, TlsVerification};

use crate::cli::{GlobalOpts, SnapshotArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(args: &SnapshotArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let fetch_config = build_fetch_config(global)?;

    let reporter = StatusReporter::new();
    let fetcher = Fetcher::new(fetch_config, reporter.clone())?;

    tracing::debug!(range = %args.range, "running refresh cycle");
    let snapshot = fetcher.fetch(args.range).await;

    output::print_snapshot(global.output, &snapshot, &reporter.active())
}

/// Build a `FetchConfig` from the config file profile, with CLI flag
/// and env overrides.
fn build_fetch_config(global: &GlobalOpts) -> Result<FetchConfig, CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    // If a profile exists, use it and apply flag overrides.
    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut fetch_config =
            config::profile_to_fetch_config(profile, &profile_name, &cfg.defaults)?;
        if let Some(ref server) = global.server {
            fetch_config.base_url = server.parse().map_err(|_| CliError::Validation {
                field: "server".into(),
                reason: format!("invalid URL: {server}"),
            })?;
        }
        if global.insecure {
            fetch_config.tls = TlsVerification::DangerAcceptInvalid;
        }
        fetch_config.timeout = Duration::from_secs(global.timeout);
        return Ok(fetch_config);
    }

    // No profile — build from flags and env vars alone.
    let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config::config_path().display().to_string(),
    })?;
    let base_url: url::Url = server.parse().map_err(|_| CliError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {server}"),
    })?;

    let username = global
        .username
        .clone()
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;
    let password = std::env::var("GRAYSCOPE_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| CliError::NoCredentials {
            profile: profile_name,
        })?;

    let mut fetch_config = FetchConfig::new(base_url, username, password);
    fetch_config.timeout = Duration::from_secs(global.timeout);
    fetch_config.limit = cfg.defaults.limit;
    fetch_config.weighting = SourceWeighting::MessageCount;
    if global.insecure {
        fetch_config.tls = TlsVerification::DangerAcceptInvalid;
    }
    Ok(fetch_config)
}
