//! Source configuration.
//!
//! [`SourceConfig`] is what the host hands over on enable. [`Endpoints`] is
//! fixed when the source is built; it names the three origins the source
//! talks to or links to.

use kemono_fetch::FetchSettings;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::KemonoError;

// ============================================================================
// Constants
// ============================================================================

/// Platform name stamped into every `PlatformId`.
pub const PLATFORM: &str = "Kemono";

/// Public site origin; deep links live here.
pub const DEFAULT_SITE_URL: &str = "https://kemono.cr";

/// REST API base.
pub const DEFAULT_API_URL: &str = "https://kemono.cr/api/v1";

/// Image host for creator icons and banners.
pub const DEFAULT_IMAGE_URL: &str = "https://img.kemono.cr";

/// Accept header sent with every API request.
pub const ACCEPT: &str = "application/json";

// ============================================================================
// Source Config
// ============================================================================

/// Configuration delivered by the host on enable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Opaque plugin instance id, used to namespace every `PlatformId`.
    #[serde(default)]
    pub id: String,
}

impl SourceConfig {
    /// Creates a config with the given plugin id.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// The origins this source talks to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Public site origin, e.g. `https://kemono.cr`.
    pub site: String,
    /// REST API base, e.g. `https://kemono.cr/api/v1`.
    pub api: String,
    /// Image host, e.g. `https://img.kemono.cr`.
    pub images: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site: DEFAULT_SITE_URL.to_string(),
            api: DEFAULT_API_URL.to_string(),
            images: DEFAULT_IMAGE_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Points the API at `api` and keeps the default site and image hosts.
    pub fn with_api(api: impl Into<String>) -> Self {
        Self {
            api: api.into(),
            ..Self::default()
        }
    }

    /// Strips trailing slashes and checks every base is an absolute URL.
    pub fn normalized(mut self) -> Result<Self, KemonoError> {
        for base in [&mut self.site, &mut self.api, &mut self.images] {
            let trimmed = base.trim_end_matches('/').to_string();
            let parsed = Url::parse(&trimmed)
                .map_err(|e| KemonoError::InvalidEndpoint(format!("{trimmed}: {e}")))?;
            if parsed.host_str().is_none() {
                return Err(KemonoError::InvalidEndpoint(format!("{trimmed}: no host")));
            }
            *base = trimmed;
        }
        Ok(self)
    }

    /// Hosts the HTTP client may contact.
    pub fn allowed_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = [&self.site, &self.api, &self.images]
            .into_iter()
            .filter_map(|base| Url::parse(base).ok()?.host_str().map(str::to_string))
            .collect();
        domains.sort();
        domains.dedup();
        domains
    }

    /// HTTP settings for talking to these endpoints: navigation headers
    /// pointing at the site, a JSON accept header, and the host allowlist.
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings::default()
            .with_header("Referer", format!("{}/", self.site))
            .with_header("Origin", self.site.clone())
            .with_header("Accept", ACCEPT)
            .with_allowed_domains(self.allowed_domains())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.site, "https://kemono.cr");
        assert_eq!(endpoints.api, "https://kemono.cr/api/v1");
        assert_eq!(endpoints.images, "https://img.kemono.cr");
    }

    #[test]
    fn test_normalized_strips_trailing_slash() {
        let endpoints = Endpoints {
            site: "https://kemono.cr/".to_string(),
            api: "https://kemono.cr/api/v1//".to_string(),
            images: "https://img.kemono.cr".to_string(),
        }
        .normalized()
        .unwrap();
        assert_eq!(endpoints.site, "https://kemono.cr");
        assert_eq!(endpoints.api, "https://kemono.cr/api/v1");
    }

    #[test]
    fn test_normalized_rejects_relative_base() {
        let endpoints = Endpoints::with_api("/api/v1");
        assert!(matches!(
            endpoints.normalized(),
            Err(KemonoError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_allowed_domains_are_deduplicated() {
        assert_eq!(
            Endpoints::default().allowed_domains(),
            vec!["img.kemono.cr".to_string(), "kemono.cr".to_string()]
        );
    }

    #[test]
    fn test_fetch_settings_carry_navigation_headers() {
        let settings = Endpoints::default().fetch_settings();
        let header = |name: &str| {
            settings
                .default_headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(header("Referer"), Some("https://kemono.cr/"));
        assert_eq!(header("Origin"), Some("https://kemono.cr"));
        assert_eq!(header("Accept"), Some("application/json"));
    }

    #[test]
    fn test_source_config_defaults() {
        let config: SourceConfig = serde_json::from_str("{}").unwrap();
        assert!(config.id.is_empty());
        assert_eq!(SourceConfig::new("abc").id, "abc");
    }
}
