//! Channel command - show a creator's channel.

use anyhow::{Result, bail};
use clap::Args;
use kemono_core::ContentSource;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the channel command.
#[derive(Args)]
pub struct ChannelArgs {
    /// Channel URL, e.g. `https://kemono.cr/patreon/user/12345`.
    pub url: String,
}

/// Runs the channel command.
pub async fn run(args: &ChannelArgs, cli: &Cli, config: &Config) -> Result<()> {
    let source = config.build_source()?;
    if !source.is_channel_url(&args.url) {
        bail!("Not a {} channel URL: {}", source.platform(), args.url);
    }

    let channel = source.get_channel(&args.url).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_channel(&channel));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&channel)?);
        }
    }

    Ok(())
}
