//! Command dispatch.

pub mod config_cmd;
pub mod snapshot;

use strum::IntoEnumIterator;

use grayscope_core::TimeRange;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Snapshot(args) => snapshot::handle(&args, &cli.global).await,
        Command::Ranges => {
            for range in TimeRange::iter() {
                println!("{range}\t{}", range.label());
            }
            Ok(())
        }
        Command::Config(args) => config_cmd::handle(&args),
    }
}
