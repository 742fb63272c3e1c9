//! Fetch context and settings.
//!
//! The fetch context is handed to the source at construction and gives it
//! the configured HTTP client.

use std::sync::Arc;
use std::time::Duration;

use crate::error::HttpError;
use crate::http::HttpClient;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent: a mobile browser, which the remote serves normally.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/110.0.5481.153 Mobile Safari/537.36";

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Timeout for a single request.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Headers attached to every request.
    pub default_headers: Vec<(String, String)>,
    /// Hosts requests may go to. `None` allows any host.
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: Vec::new(),
            allowed_domains: None,
        }
    }
}

impl FetchSettings {
    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Adds a header sent with every request, replacing an earlier one with
    /// the same (case-insensitive) name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.default_headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.default_headers.push((name, value.into()));
        self
    }

    /// Restricts requests to the given hosts and their subdomains.
    pub fn with_allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context provided to a source, giving access to the HTTP client.
#[derive(Debug, Clone)]
pub struct FetchContext {
    /// HTTP client built from `settings`.
    pub http: Arc<HttpClient>,
    /// Settings the client was built with.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, HttpError> {
        let http = HttpClient::from_settings(&settings)?;
        Ok(Self {
            http: Arc::new(http),
            settings,
        })
    }
}
