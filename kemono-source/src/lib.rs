// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Kemono Source
//!
//! A [`kemono_core::ContentSource`] backed by the Kemono REST API.
//!
//! Kemono archives creator posts from several services (Patreon, Fanbox,
//! Gumroad and others). This crate surfaces the posts whose primary file is
//! an MP4 as videos, creators as channels, and post comments as flat
//! comment lists.
//!
//! ## Modules
//!
//! - **config**: Endpoints and the configuration delivered on enable
//! - **urls**: Channel and post deep links
//! - **api**: REST client and wire records
//! - **cache**: Per-source creator cache
//! - **parser**: Wire record to host object mapping
//! - **pagers**: Offset-paged listings
//! - **source**: The [`KemonoSource`] itself
//!
//! ## Usage
//!
//! ```ignore
//! use kemono_core::{ContentSource, SourceSettings};
//! use kemono_source::{KemonoSource, SourceConfig};
//!
//! let mut source = KemonoSource::new()?;
//! source.enable(SourceConfig::new("plugin-id"), SourceSettings::new());
//!
//! let mut pager = source.search("animation").await?;
//! for video in pager.results() {
//!     println!("{} - {}", video.name, video.url);
//! }
//! if pager.has_more() {
//!     pager.next_page().await?;
//! }
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod pagers;
pub mod parser;
pub mod source;
pub mod urls;

pub use api::KemonoApiClient;
pub use cache::{AuthorCache, ChannelSummary};
pub use config::{Endpoints, PLATFORM, SourceConfig};
pub use error::KemonoError;
pub use pagers::PAGE_SIZE;
pub use source::KemonoSource;
pub use urls::{CreatorRef, ParsedUrl, PostRef, UrlCodec};
