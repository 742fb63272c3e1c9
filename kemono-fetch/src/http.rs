//! HTTP client with tracing, default headers and domain allowlist.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Headers attached to every request (e.g. `Referer`/`Origin`)
//! - Domain allowlist so a crafted URL cannot send requests elsewhere

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::context::FetchSettings;
use crate::error::HttpError;

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing, default headers and domain allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a client from fetch settings.
    pub fn from_settings(settings: &FetchSettings) -> Result<Self, HttpError> {
        let headers = build_headers(&settings.default_headers)?;

        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: client,
            allowed_domains: settings.allowed_domains.clone(),
        })
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let Some(ref allowed) = self.allowed_domains else {
            return Ok(()); // No restrictions
        };

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request.
    ///
    /// Any status is returned as a response; callers decide what counts as
    /// failure.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.is_domain_allowed(url)?;
        debug!("GET request");

        let response = self.inner.get(url).send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

/// Converts configured header pairs into a header map.
fn build_headers(pairs: &[(String, String)]) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();

    for (name, value) in pairs {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_domains(domains: &[&str]) -> HttpClient {
        let settings = FetchSettings::default()
            .with_allowed_domains(domains.iter().map(ToString::to_string).collect());
        HttpClient::from_settings(&settings).unwrap()
    }

    #[test]
    fn test_domain_allowlist() {
        let client = client_with_domains(&["kemono.cr"]);

        // Allowed domain
        assert!(client.is_domain_allowed("https://kemono.cr/api/v1/creators").is_ok());

        // Subdomain matching
        assert!(client.is_domain_allowed("https://img.kemono.cr/icons/patreon/1").is_ok());

        // Not allowed
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://notkemono.cr/").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::from_settings(&FetchSettings::default()).unwrap();
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::from_settings(&FetchSettings::default()).unwrap();
        let err = client.is_domain_allowed("not-a-valid-url").unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl(_)));
        assert!(err.is_rejected_locally());
    }

    #[test]
    fn test_build_headers() {
        let headers = build_headers(&[
            ("Referer".to_string(), "https://kemono.cr/".to_string()),
            ("Origin".to_string(), "https://kemono.cr".to_string()),
        ])
        .unwrap();
        assert_eq!(headers.get("referer").unwrap(), "https://kemono.cr/");
        assert_eq!(headers.get("origin").unwrap(), "https://kemono.cr");
    }

    #[tokio::test]
    async fn test_default_headers_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ping")
            .match_header("referer", "https://kemono.cr/")
            .match_header("origin", "https://kemono.cr")
            .with_status(200)
            .with_body("pong")
            .create_async()
            .await;

        let settings = FetchSettings::default()
            .with_header("Referer", "https://kemono.cr/")
            .with_header("Origin", "https://kemono.cr");
        let client = HttpClient::from_settings(&settings).unwrap();

        let response = client.get(&format!("{}/ping", server.url())).await.unwrap();
        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "pong");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::from_settings(&FetchSettings::default()).unwrap();
        let response = client
            .get(&format!("{}/missing", server.url()))
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_disallowed_domain_is_not_sent() {
        let client = client_with_domains(&["kemono.cr"]);
        let err = client.get("http://127.0.0.1:9/").await.unwrap_err();
        assert!(matches!(err, HttpError::DomainNotAllowed(_)));
    }
}
