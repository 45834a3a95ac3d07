//! `edgenode config` — inspect the effective configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::app::AppContext;
use crate::application::ports::ConfigStore;

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, defaults, env overrides)
    Show,
}

/// Run the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or its path
/// cannot be determined.
pub fn run(app: &AppContext, cmd: &ConfigCommand, store: &impl ConfigStore) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show => show_config(app, store),
    }
}

fn show_config(app: &AppContext, store: &impl ConfigStore) -> Result<ExitCode> {
    let path = store.path()?;
    if app.is_json() {
        let doc = serde_json::json!({
            "path": path.display().to_string(),
            "config": &app.config,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&doc).context("JSON serialization failed")?
        );
        return Ok(ExitCode::SUCCESS);
    }

    let yaml = serde_yaml::to_string(&app.config).context("cannot serialize config")?;
    app.output.header("Configuration");
    app.output.kv("File:", &path.display().to_string());
    if !path.exists() {
        app.output.info("No configuration file; using defaults.");
    }
    println!();
    print!("{yaml}");
    Ok(ExitCode::SUCCESS)
}
