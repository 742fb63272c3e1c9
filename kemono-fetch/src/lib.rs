// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Kemono Fetch
//!
//! Outbound HTTP plumbing for the Kemono content source.
//!
//! - [`http::HttpClient`] - `reqwest` wrapper with default navigation
//!   headers, a domain allowlist and request tracing
//! - [`context::FetchSettings`] - Timeout, user agent, headers and allowlist
//! - [`context::FetchContext`] - Bundles the client with its settings
//!
//! The client never retries: a failed request surfaces immediately.
//!
//! ## Example
//!
//! ```ignore
//! use kemono_fetch::{FetchContext, FetchSettings};
//!
//! let settings = FetchSettings::default()
//!     .with_header("Referer", "https://kemono.cr/")
//!     .with_allowed_domains(vec!["kemono.cr".to_string()]);
//! let ctx = FetchContext::with_settings(settings)?;
//!
//! let response = ctx.http.get("https://kemono.cr/api/v1/creators").await?;
//! ```

pub mod context;
pub mod error;
pub mod http;

pub use context::{FetchContext, FetchSettings};
pub use error::HttpError;
pub use http::HttpClient;
