//! `grayscope config` — config file management.

use grayscope_config as config;

use crate::cli::{ConfigAction, ConfigArgs};
use crate::error::CliError;

pub fn handle(args: &ConfigArgs) -> Result<(), CliError> {
    match args.action {
        ConfigAction::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigAction::Init => init(),
    }
}

/// Write a starter config with one placeholder profile. Refuses to
/// overwrite an existing file.
fn init() -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    let mut cfg = config::Config::default();
    cfg.profiles.insert(
        "default".into(),
        config::Profile {
            server: "http://192.168.10.239:9000".into(),
            username: Some("administrator".into()),
            password_env: Some("GRAYSCOPE_PASSWORD".into()),
            ..config::Profile::default()
        },
    );
    config::save_config(&cfg)?;

    println!("Wrote starter config to {}", path.display());
    Ok(())
}
