use thiserror::Error;

/// Top-level error type for the `grayscope-api` crate.
///
/// Covers every failure mode of the two upstream calls: credential
/// rejection, transport problems, non-2xx API responses, and bodies
/// that cannot be decoded. `grayscope-core` decides which of these
/// trigger the next fallback stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials rejected by the server (HTTP 401/403).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// HTTP transport error (timeout, connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response that is not an auth failure.
    #[error("Graylog API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Body was not JSON, or the expected envelope field was missing.
    /// Carries the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates rejected credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
