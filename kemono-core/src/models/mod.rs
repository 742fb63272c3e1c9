//! Canonical value objects shared with the host.
//!
//! These types are the shapes the host application renders. Sources build
//! them from whatever their remote API returns.
//!
//! ## Submodules
//!
//! - [`platform`] - Identity types (PlatformId, AuthorLink, Thumbnail, Rating)
//! - [`channel`] - Channel pages
//! - [`video`] - Video summaries, details and playable sources
//! - [`comment`] - Flat comments
//! - [`page`] - Result pages and search capabilities
//! - [`settings`] - User settings passed on enable

mod channel;
mod comment;
mod page;
mod platform;
mod settings;
mod video;

// Re-export everything at the models level
pub use channel::Channel;
pub use comment::Comment;
pub use page::{FeedType, Page, SearchCapabilities, SortOrder};
pub use platform::{AuthorLink, PlatformId, Rating, Thumbnail};
pub use settings::SourceSettings;
pub use video::{Video, VideoDetails, VideoSource};
