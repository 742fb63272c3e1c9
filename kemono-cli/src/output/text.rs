//! Text output formatting with colors.

use chrono::DateTime;
use kemono_core::{AuthorLink, Channel, Comment, SearchCapabilities, Video, VideoDetails};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Longest comment body shown before truncation.
const MAX_COMMENT_CHARS: usize = 200;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a listing of videos.
    pub fn format_videos(&self, videos: &[Video], pages: u32, has_more: bool) -> String {
        if videos.is_empty() {
            return self.dim("No videos found");
        }

        let mut lines: Vec<String> = videos.iter().map(|v| self.format_video_line(v)).collect();
        lines.push(String::new());
        lines.push(self.format_footer(videos.len(), "video", pages, has_more));
        lines.join("\n")
    }

    /// Formats one video as a listing line.
    pub fn format_video_line(&self, video: &Video) -> String {
        format!(
            "{}  {}  {}\n    {}",
            self.dim(&format_timestamp(video.datetime)),
            self.bold(&video.name),
            self.cyan(&video.author.name),
            video.url
        )
    }

    /// Formats channel-search results.
    pub fn format_author_links(&self, links: &[AuthorLink]) -> String {
        if links.is_empty() {
            return self.dim("No creators found");
        }

        let mut lines: Vec<String> = links
            .iter()
            .map(|link| format!("{}\n    {}", self.bold(&link.name), link.url))
            .collect();
        lines.push(String::new());
        lines.push(self.format_footer(links.len(), "creator", 1, false));
        lines.join("\n")
    }

    /// Formats a channel page.
    pub fn format_channel(&self, channel: &Channel) -> String {
        [
            self.bold(&channel.name),
            "─".repeat(40),
            format!("Id:        {}", channel.id.value),
            format!("URL:       {}", self.cyan(&channel.url)),
            format!("Icon:      {}", channel.thumbnail),
            format!("Banner:    {}", channel.banner),
        ]
        .join("\n")
    }

    /// Formats a playable video.
    pub fn format_video_details(&self, details: &VideoDetails) -> String {
        let video = &details.video;
        let mut lines = vec![
            self.bold(&video.name),
            "─".repeat(40),
            format!("Author:    {} ({})", self.cyan(&video.author.name), video.author.url),
            format!("Published: {}", format_timestamp(video.datetime)),
            format!("URL:       {}", video.url),
        ];

        for source in &details.sources {
            lines.push(format!(
                "Source:    {} {}",
                self.green(&source.url),
                self.dim(&format!("[{}]", source.container))
            ));
        }

        let description = details.description.trim();
        if !description.is_empty() {
            lines.push(String::new());
            lines.push(description.to_string());
        }

        lines.join("\n")
    }

    /// Formats a flat comment list.
    pub fn format_comments(&self, comments: &[Comment]) -> String {
        if comments.is_empty() {
            return self.dim("No comments");
        }

        let mut lines = Vec::new();
        for comment in comments {
            lines.push(format!(
                "{}  {}",
                self.yellow(&comment.author.name),
                self.dim(&format_timestamp(comment.date))
            ));
            lines.push(format!("    {}", truncate(&comment.message, MAX_COMMENT_CHARS)));
        }
        lines.push(String::new());
        lines.push(self.format_footer(comments.len(), "comment", 1, false));
        lines.join("\n")
    }

    /// Formats one search capability block.
    pub fn format_capabilities(&self, label: &str, caps: &SearchCapabilities) -> String {
        let list = |items: Vec<String>| {
            if items.is_empty() {
                self.dim("none")
            } else {
                items.join(", ")
            }
        };

        [
            self.bold(label),
            format!(
                "  Types:   {}",
                list(caps.types.iter().map(|t| format!("{t:?}")).collect())
            ),
            format!(
                "  Sorts:   {}",
                list(caps.sorts.iter().map(|s| format!("{s:?}")).collect())
            ),
            format!("  Filters: {}", list(caps.filters.clone())),
        ]
        .join("\n")
    }

    fn format_footer(&self, count: usize, noun: &str, pages: u32, has_more: bool) -> String {
        let plural = if count == 1 { "" } else { "s" };
        let page_word = if pages == 1 { "page" } else { "pages" };
        let more = if has_more { ", more available" } else { "" };
        self.dim(&format!("{count} {noun}{plural} ({pages} {page_word}{more})"))
    }

    // Color helpers

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Formats Unix seconds as a UTC date and time; 0 means unknown.
pub fn format_timestamp(secs: i64) -> String {
    if secs == 0 {
        return "unknown date".to_string();
    }
    DateTime::from_timestamp(secs, 0).map_or_else(
        || "unknown date".to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Shortens `text` to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
