//! Contents command - list or search a creator's videos.

use anyhow::Result;
use clap::Args;
use kemono_core::ContentSource;
use tracing::info;

use super::{collect_pages, print_videos};
use crate::Cli;
use crate::config::Config;

/// Arguments for the contents command.
#[derive(Args)]
pub struct ContentsArgs {
    /// Channel URL, e.g. `https://kemono.cr/patreon/user/12345`.
    pub url: String,

    /// Search within the channel instead of listing it.
    #[arg(long, short = 'Q')]
    pub query: Option<String>,

    /// Number of pages to fetch.
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

/// Runs the contents command.
pub async fn run(args: &ContentsArgs, cli: &Cli, config: &Config) -> Result<()> {
    let source = config.build_source()?;

    let mut pager = match &args.query {
        Some(query) => {
            info!(url = %args.url, query = %query, "Searching channel");
            source.search_channel_contents(&args.url, query).await?
        }
        None => {
            info!(url = %args.url, "Listing channel");
            source.get_channel_contents(&args.url).await?
        }
    };
    let (videos, pages, has_more) = collect_pages(&mut pager, args.pages).await?;

    print_videos(&videos, pages, has_more, cli)
}
