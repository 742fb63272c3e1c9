//! Comments command - show the comments on a post.

use anyhow::Result;
use clap::Args;
use kemono_core::ContentSource;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the comments command.
#[derive(Args)]
pub struct CommentsArgs {
    /// Post URL, e.g. `https://kemono.cr/patreon/user/12345/post/9`.
    pub url: String,
}

/// Runs the comments command.
pub async fn run(args: &CommentsArgs, cli: &Cli, config: &Config) -> Result<()> {
    let source = config.build_source()?;
    let pager = source.get_comments(&args.url).await?;
    let comments = pager.results();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_comments(comments));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_listing(comments, 1, pager.has_more())?);
        }
    }

    Ok(())
}
