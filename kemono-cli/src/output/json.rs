//! JSON output formatting.

use anyhow::Result;
use kemono_core::SearchCapabilities;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// A listing collected over one or more pages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingOutput<'a, T> {
    /// Pages fetched.
    pub pages: u32,
    /// Whether another page was available after the last one fetched.
    pub has_more: bool,
    /// Number of results.
    pub count: usize,
    /// The results.
    pub results: &'a [T],
}

/// Search capabilities of the source.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitiesOutput<'a> {
    /// Platform name.
    pub platform: &'a str,
    /// Global search.
    pub search: &'a SearchCapabilities,
    /// Channel-scoped search.
    pub channel_search: &'a SearchCapabilities,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a collected listing.
    pub fn format_listing<T: Serialize>(
        &self,
        results: &[T],
        pages: u32,
        has_more: bool,
    ) -> Result<String> {
        self.format(&ListingOutput {
            pages,
            has_more,
            count: results.len(),
            results,
        })
    }

    /// Formats the source's capabilities.
    pub fn format_capabilities(
        &self,
        platform: &str,
        search: &SearchCapabilities,
        channel_search: &SearchCapabilities,
    ) -> Result<String> {
        self.format(&CapabilitiesOutput {
            platform,
            search,
            channel_search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pretty() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(output, r#"{"a":1}"#);
    }

    #[test]
    fn test_listing_envelope() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format_listing(&[1, 2, 3], 2, true).unwrap();
        assert_eq!(output, r#"{"pages":2,"hasMore":true,"count":3,"results":[1,2,3]}"#);
    }
}
