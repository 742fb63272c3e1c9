//! Video command - resolve a post into a playable video.

use anyhow::{Result, bail};
use clap::Args;
use kemono_core::ContentSource;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the video command.
#[derive(Args)]
pub struct VideoArgs {
    /// Post URL, e.g. `https://kemono.cr/patreon/user/12345/post/9`.
    pub url: String,
}

/// Runs the video command.
pub async fn run(args: &VideoArgs, cli: &Cli, config: &Config) -> Result<()> {
    let source = config.build_source()?;
    if !source.is_content_details_url(&args.url) {
        bail!("Not a {} post URL: {}", source.platform(), args.url);
    }

    let details = source.get_content_details(&args.url).await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_video_details(&details));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&details)?);
        }
    }

    Ok(())
}
