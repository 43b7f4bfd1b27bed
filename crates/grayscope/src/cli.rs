//! Argument parsing for the grayscope CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

use grayscope_core::TimeRange;

#[derive(Debug, Parser)]
#[command(
    name = "grayscope",
    version,
    about = "Network traffic snapshots from a Graylog server",
    long_about = "Fetches log records from a Graylog server and renders a \
                  normalized traffic snapshot: per-category shares, protocol \
                  counts, an hourly series, and recent security/system events. \
                  Degrades to input metadata or sample data when the server \
                  is unreachable."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use.
    #[arg(long, short = 'p', global = true, env = "GRAYSCOPE_PROFILE")]
    pub profile: Option<String>,

    /// Graylog base URL (overrides the profile).
    #[arg(long, global = true, env = "GRAYSCOPE_SERVER")]
    pub server: Option<String>,

    /// Username for HTTP Basic auth (overrides the profile).
    #[arg(long, global = true, env = "GRAYSCOPE_USERNAME")]
    pub username: Option<String>,

    /// Accept invalid TLS certificates (self-signed servers).
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 15)]
    pub timeout: u64,

    /// Output format.
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch one traffic snapshot and print it.
    Snapshot(SnapshotArgs),

    /// List the selectable time ranges.
    Ranges,

    /// Manage configuration.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// Display period (1h, 6h, 12h, 24h, 7d).
    #[arg(long, short = 'r', default_value = "24h")]
    pub range: TimeRange,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file path.
    Path,

    /// Write a starter config file.
    Init,
}
