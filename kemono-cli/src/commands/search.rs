//! Search command - full-text search over all posts.

use anyhow::Result;
use clap::Args;
use kemono_core::ContentSource;
use tracing::info;

use super::{collect_pages, print_videos};
use crate::Cli;
use crate::config::Config;

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search query (may be empty).
    #[arg(default_value = "")]
    pub query: String,

    /// Number of pages to fetch.
    #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli, config: &Config) -> Result<()> {
    info!(query = %args.query, pages = args.pages, "Searching posts");

    let source = config.build_source()?;
    let mut pager = source.search(&args.query).await?;
    let (videos, pages, has_more) = collect_pages(&mut pager, args.pages).await?;

    print_videos(&videos, pages, has_more, cli)
}
