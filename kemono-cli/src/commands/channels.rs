//! Channels command - search creators by name.

use anyhow::Result;
use clap::Args;
use kemono_core::ContentSource;
use tracing::info;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the channels command.
#[derive(Args)]
pub struct ChannelsArgs {
    /// Case-insensitive name fragment.
    pub query: String,
}

/// Runs the channels command.
pub async fn run(args: &ChannelsArgs, cli: &Cli, config: &Config) -> Result<()> {
    info!(query = %args.query, "Searching creators");

    let source = config.build_source()?;
    let pager = source.search_channels(&args.query).await?;
    let links = pager.results();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_author_links(links));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_listing(links, 1, pager.has_more())?);
        }
    }

    Ok(())
}
