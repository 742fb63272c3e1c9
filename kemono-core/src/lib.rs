// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Kemono Core
//!
//! The host-facing contract of the Kemono content source.
//!
//! This crate holds everything a host application needs to talk to a
//! content source without knowing which remote platform sits behind it:
//!
//! - Canonical value objects (channels, videos, comments, pages)
//! - The [`Pager`] cursor and its [`PageSource`] seam
//! - The [`ContentSource`] trait every source implements
//! - The [`CoreError`] type returned across the contract
//!
//! ## Key Types
//!
//! ### Identity
//! - [`PlatformId`] - Namespaced identifier (platform, value, plugin id)
//! - [`AuthorLink`] - Compact reference to a channel
//!
//! ### Content
//! - [`Channel`] - A creator's channel page
//! - [`Video`] - A video summary as shown in listings
//! - [`VideoDetails`] - A playable video with sources and description
//! - [`Comment`] - A flat comment on a video
//!
//! ### Paging
//! - [`Page`] - One page of results plus the "more remain" flag
//! - [`Pager`] - Stateful cursor over a [`PageSource`]
//! - [`SearchCapabilities`] - What a search endpoint accepts

pub mod error;
pub mod models;
pub mod pager;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Identity
    AuthorLink,
    PlatformId,
    Rating,
    Thumbnail,
    // Content
    Channel,
    Comment,
    VideoDetails,
    Video,
    VideoSource,
    // Paging
    FeedType,
    Page,
    SearchCapabilities,
    SortOrder,
    // Settings
    SourceSettings,
};

// Re-export paging and traits
pub use pager::{PageSource, Pager};
pub use traits::ContentSource;
