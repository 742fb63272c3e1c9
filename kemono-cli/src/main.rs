// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Kemono CLI - browse Kemono creator videos from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Search all posts
//! kemono search "animation"
//!
//! # Fetch three pages of results as JSON
//! kemono search "animation" --pages 3 --format json --pretty
//!
//! # Find creators by name
//! kemono channels alice
//!
//! # Inspect a channel and list its videos
//! kemono channel https://kemono.cr/patreon/user/12345
//! kemono contents https://kemono.cr/patreon/user/12345 --query dance
//!
//! # Resolve a playable source and read the comments
//! kemono video https://kemono.cr/patreon/user/12345/post/9
//! kemono comments https://kemono.cr/patreon/user/12345/post/9
//! ```

mod commands;
mod config;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use commands::{
    capabilities, channel, channels, comments, config as config_cmd, contents, search, video,
};

// ============================================================================
// CLI Definition
// ============================================================================

/// Kemono CLI - browse creator videos.
#[derive(Parser)]
#[command(name = "kemono")]
#[command(about = "Browse Kemono creator videos from the command line")]
#[command(long_about = r#"
Kemono CLI exposes the Kemono content source: search posts, look up
creators, list a creator's videos, resolve a playable source and read
comments. Only posts whose primary file is an MP4 are shown.

Examples:
  kemono search "animation"                              # Global search
  kemono channels alice                                  # Creators by name
  kemono channel https://kemono.cr/patreon/user/1        # Channel page
  kemono contents https://kemono.cr/patreon/user/1       # Channel videos
  kemono video https://kemono.cr/patreon/user/1/post/2   # Playable source
  kemono --format json search clip                       # JSON output
"#)]
#[command(version)]
#[command(author = "Kemono Source Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging, no error text).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the user config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search all posts.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Search creators by name.
    Channels(channels::ChannelsArgs),

    /// Show a creator's channel.
    Channel(channel::ChannelArgs),

    /// List (or search) a creator's videos.
    #[command(visible_alias = "c")]
    Contents(contents::ContentsArgs),

    /// Show a video and its playable source.
    #[command(visible_alias = "v")]
    Video(video::VideoArgs),

    /// Show the comments on a video.
    Comments(comments::CommentsArgs),

    /// Show what the search operations accept.
    Capabilities,

    /// Manage configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    #[allow(dead_code)]
    Success = 0,
    /// Any failure.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Handle used to narrow the log filter once the config is loaded.
type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Log level used until the config file has been read.
const DEFAULT_LOG_LEVEL: &str = "warn";

fn filter_directive(verbose: bool, level: &str) -> String {
    if verbose {
        "kemono=debug,info".to_string()
    } else {
        format!("kemono={level}")
    }
}

fn setup_logging(verbose: bool, quiet: bool) -> Option<FilterHandle> {
    if quiet {
        return None;
    }

    let (filter, handle) =
        reload::Layer::new(EnvFilter::new(filter_directive(verbose, DEFAULT_LOG_LEVEL)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    Some(handle)
}

/// Applies the configured level; `--verbose` always wins.
fn apply_log_level(handle: Option<&FilterHandle>, verbose: bool, level: &str) {
    let Some(handle) = handle else { return };
    if verbose {
        return;
    }

    if let Err(e) = handle.reload(EnvFilter::new(filter_directive(false, level))) {
        warn!(error = %e, level, "Could not apply configured log level");
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_handle = setup_logging(cli.verbose, cli.quiet);

    let config = match config::Config::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    };

    apply_log_level(log_handle.as_ref(), cli.verbose, &config.general.log_level);

    let result = match &cli.command {
        Commands::Search(args) => search::run(args, &cli, &config).await,
        Commands::Channels(args) => channels::run(args, &cli, &config).await,
        Commands::Channel(args) => channel::run(args, &cli, &config).await,
        Commands::Contents(args) => contents::run(args, &cli, &config).await,
        Commands::Video(args) => video::run(args, &cli, &config).await,
        Commands::Comments(args) => comments::run(args, &cli, &config).await,
        Commands::Capabilities => capabilities::run(&cli, &config),
        Commands::Config(args) => config_cmd::run(args, &cli, &config),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
