//! Config command - manage configuration.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a configuration file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli, config: &Config) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(config, cli),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init { force } => init_config(*force, cli),
    }
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

fn show_config(config: &Config, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("Kemono Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!(
                "Plugin id:  {}",
                if config.source.id.is_empty() {
                    "(none)"
                } else {
                    &config.source.id
                }
            );
            println!("Site:       {}", config.endpoints.site);
            println!("API:        {}", config.endpoints.api);
            println!("Images:     {}", config.endpoints.images);
            println!("Timeout:    {}s", config.general.timeout_secs);
            println!("Log level:  {}", config.general.log_level);
            if let Some(user_agent) = &config.general.user_agent {
                println!("User agent: {user_agent}");
            }
            if !config.settings.is_empty() {
                println!("Settings:   {} entries", config.settings.len());
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    match cli.format {
        OutputFormat::Text => {
            println!("Config file: {}", path.display());
            if !path.exists() {
                println!("(not created yet, defaults in use)");
            }
        }
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": path.display().to_string(),
                "exists": path.exists(),
            });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote {}", path.display());

    Ok(())
}
