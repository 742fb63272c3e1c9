//! CLI command implementations.

pub mod capabilities;
pub mod channel;
pub mod channels;
pub mod comments;
pub mod config;
pub mod contents;
pub mod search;
pub mod video;

use anyhow::Result;
use kemono_core::{Pager, Video};
use tracing::debug;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Drains up to `pages` pages from `pager`, starting with the one it holds.
///
/// Returns the collected results, the number of pages read and whether the
/// remote had more.
pub async fn collect_pages<T: Send>(
    pager: &mut Pager<T>,
    pages: u32,
) -> Result<(Vec<T>, u32, bool)> {
    let mut results = pager.take_results();
    let mut fetched = 1;

    while fetched < pages && pager.has_more() {
        pager.next_page().await?;
        results.extend(pager.take_results());
        fetched += 1;
        debug!(page = pager.page(), total = results.len(), "Collected page");
    }

    Ok((results, fetched, pager.has_more()))
}

/// Prints a collected video listing in the selected format.
pub fn print_videos(videos: &[Video], pages: u32, has_more: bool, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_videos(videos, pages, has_more));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_listing(videos, pages, has_more)?);
        }
    }
    Ok(())
}
