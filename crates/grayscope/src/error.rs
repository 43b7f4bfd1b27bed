//! CLI error types with miette diagnostics.

use miette::Diagnostic;
use thiserror::Error;

use grayscope_config::ConfigError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(grayscope::no_credentials),
        help(
            "Configure credentials with: grayscope config init\n\
             Or set GRAYSCOPE_USERNAME / GRAYSCOPE_PASSWORD environment variables."
        )
    )]
    NoCredentials { profile: String },

    #[error("No Graylog server configured")]
    #[diagnostic(
        code(grayscope::no_config),
        help(
            "Create a config with: grayscope config init\n\
             Expected at: {path}\n\
             Or pass --server and GRAYSCOPE_USERNAME / GRAYSCOPE_PASSWORD."
        )
    )]
    NoConfig { path: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(grayscope::validation))]
    Validation { field: String, reason: String },

    #[error("Could not build the HTTP client: {message}")]
    #[diagnostic(
        code(grayscope::transport),
        help("Check the server URL and any ca_cert path in your profile.")
    )]
    Transport { message: String },

    #[error(transparent)]
    #[diagnostic(code(grayscope::config))]
    Config(Box<figment::Error>),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(grayscope::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Figment(e) => Self::Config(e),
            ConfigError::Io(e) => Self::Io(e),
            ConfigError::Serialization(e) => Self::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}

impl From<grayscope_api::Error> for CliError {
    fn from(err: grayscope_api::Error) -> Self {
        // Only client-construction errors reach the CLI; runtime
        // failures are absorbed by the fetcher's fallback stages.
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::NoConfig { .. } => exit_code::USAGE,
            Self::Transport { .. } => exit_code::CONNECTION,
            _ => exit_code::GENERAL,
        }
    }
}
