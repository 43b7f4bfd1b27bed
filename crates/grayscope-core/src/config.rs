// Fetch configuration consumed by the pipeline.
//
// Credentials are opaque to the core: resolution (keyring, env vars,
// profiles) lives in `grayscope-config`, which produces this struct.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::pipeline::aggregate::SourceWeighting;

/// TLS verification behavior for the upstream connection.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// Use the system certificate store.
    #[default]
    SystemDefaults,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed instances).
    DangerAcceptInvalid,
}

impl From<TlsVerification> for grayscope_api::TlsMode {
    fn from(tls: TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Everything the [`Fetcher`](crate::Fetcher) needs to reach Graylog
/// and shape its snapshots.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Server root, e.g. `http://192.168.10.239:9000`.
    pub base_url: Url,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-call timeout for both upstream requests.
    pub timeout: Duration,
    /// Result cap passed to the search endpoint.
    pub limit: u32,
    /// Full-text query string, `*` by default.
    pub query: String,
    /// How per-category tallies become percentages.
    pub weighting: SourceWeighting,
}

impl FetchConfig {
    /// Config with defaults: 15s timeout, 1000-message cap, match-all
    /// query, message-count weighting.
    pub fn new(base_url: Url, username: String, password: SecretString) -> Self {
        Self {
            base_url,
            username,
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(15),
            limit: 1000,
            query: "*".into(),
            weighting: SourceWeighting::default(),
        }
    }
}
