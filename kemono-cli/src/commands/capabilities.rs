//! Capabilities command - show what the search operations accept.

use anyhow::Result;
use kemono_core::ContentSource;

use crate::config::Config;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the capabilities command.
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let source = config.build_source()?;
    let search = source.search_capabilities();
    let channel_search = source.search_channel_contents_capabilities();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_capabilities("Search", &search));
            println!();
            println!(
                "{}",
                formatter.format_capabilities("Channel search", &channel_search)
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format_capabilities(source.platform(), &search, &channel_search)?
            );
        }
    }

    Ok(())
}
