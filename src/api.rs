//! Thin HTTP client for the NewsData.io `/news` endpoint.
//!
//! Every query shape goes through one `GET /news` call with different query
//! parameters. Non-2xx statuses are classified into the error categories the
//! repository's fallback policy cares about (401/403/429/500); transport and
//! decode failures are kept distinct from HTTP failures because the
//! repository treats them differently.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::model::NewsResponse;

/// The trending feed asks for a bigger page than the regular queries.
const TRENDING_PAGE_SIZE: u32 = 20;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from a single API call. Messages are user-facing; strict
/// repository queries surface them verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not valid JSON for the expected shape
    #[error("Malformed response: {0}")]
    Parse(String),
    /// HTTP 401
    #[error("Invalid API key. Please check your NewsData.io API key.")]
    InvalidApiKey,
    /// HTTP 403
    #[error("Access forbidden. Please check your API subscription.")]
    Forbidden,
    /// HTTP 429
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,
    /// HTTP 500
    #[error("Server error. Please try again later.")]
    Server,
    /// Any other non-2xx status
    #[error("API error: HTTP {0}")]
    Http(u16),
    /// The configured base URL could not be parsed
    #[error("Invalid API base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// True for failures where no well-formed HTTP response arrived
    /// (the repository consults the offline cache only on this path).
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout | ApiError::Parse(_))
    }
}

fn classify_status(status: u16) -> ApiError {
    match status {
        401 => ApiError::InvalidApiKey,
        403 => ApiError::Forbidden,
        429 => ApiError::RateLimited,
        500 => ApiError::Server,
        other => ApiError::Http(other),
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Clone)]
pub struct NewsApi {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    page_size: u32,
    timeout: Duration,
}

impl NewsApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::BaseUrl(format!("{}: {}", config.base_url, e)))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key: config.resolved_api_key(),
            page_size: config.page_size,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// One `GET /news` round trip.
    ///
    /// Returns `Ok(None)` for a 2xx response whose body is empty or JSON
    /// `null` — the "success with null body" case the repository falls back
    /// on without treating it as an error.
    async fn fetch(&self, params: &[(&str, String)]) -> Result<Option<NewsResponse>, ApiError> {
        let url = self
            .base_url
            .join("news")
            .map_err(|e| ApiError::BaseUrl(e.to_string()))?;

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.expose_secret())]);
        }
        request = request.query(params);

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "API call failed");
            return Err(classify_status(status.as_u16()));
        }

        let body = response.text().await.map_err(ApiError::Network)?;
        if body.trim().is_empty() || body.trim() == "null" {
            return Ok(None);
        }

        let parsed: NewsResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(Some(parsed))
    }

    // ========================================================================
    // Query Shapes
    // ========================================================================

    /// Latest headlines. The API localizes by language *and* country.
    pub async fn latest(
        &self,
        language: &str,
        country: &str,
    ) -> Result<Option<NewsResponse>, ApiError> {
        self.fetch(&[
            ("language", language.to_string()),
            ("country", country.to_string()),
            ("size", self.page_size.to_string()),
        ])
        .await
    }

    pub async fn by_category(
        &self,
        category: &str,
        language: &str,
    ) -> Result<Option<NewsResponse>, ApiError> {
        self.fetch(&[
            ("category", category.to_string()),
            ("language", language.to_string()),
            ("size", self.page_size.to_string()),
        ])
        .await
    }

    pub async fn search(
        &self,
        query: &str,
        language: &str,
    ) -> Result<Option<NewsResponse>, ApiError> {
        self.fetch(&[
            ("q", query.to_string()),
            ("language", language.to_string()),
            ("size", self.page_size.to_string()),
        ])
        .await
    }

    /// Top stories, a wider page than the other queries.
    pub async fn trending(&self, language: &str) -> Result<Option<NewsResponse>, ApiError> {
        self.fetch(&[
            ("category", "top".to_string()),
            ("language", language.to_string()),
            ("size", TRENDING_PAGE_SIZE.to_string()),
        ])
        .await
    }

    pub async fn business(&self, language: &str) -> Result<Option<NewsResponse>, ApiError> {
        self.by_category("business", language).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VALID_BODY: &str = r#"{
        "status": "success",
        "totalResults": 1,
        "results": [{
            "article_id": "w1",
            "title": "Wire Article",
            "link": "https://example.com/w1",
            "pubDate": "2026-08-26 09:00:00",
            "source_id": "wire",
            "source_priority": 1,
            "source_name": "Wire",
            "source_url": "https://wire.example.com",
            "language": "en",
            "country": ["us"],
            "category": ["top"]
        }]
    }"#;

    fn test_api(server: &MockServer) -> NewsApi {
        let config = Config {
            api_key: Some("pub_test_key".to_string()),
            base_url: format!("{}/", server.uri()),
            page_size: 10,
            request_timeout_secs: 5,
            chars_per_minute: 200,
        };
        NewsApi::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_latest_sends_expected_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("apikey", "pub_test_key"))
            .and(query_param("language", "hi"))
            .and(query_param("country", "in"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        let response = api.latest("hi", "in").await.unwrap().unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].id, "w1");
    }

    #[tokio::test]
    async fn test_search_and_category_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("q", "rust language"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        api.search("rust language", "en").await.unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("category", "top"))
            .and(query_param("size", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(VALID_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let api = test_api(&server);
        api.trending("en").await.unwrap();
    }

    #[tokio::test]
    async fn test_status_classification() {
        for (status, check) in [
            (401u16, ApiError::InvalidApiKey),
            (403, ApiError::Forbidden),
            (429, ApiError::RateLimited),
            (500, ApiError::Server),
            (502, ApiError::Http(502)),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let api = test_api(&server);
            let err = api.latest("en", "us").await.unwrap_err();
            assert_eq!(
                std::mem::discriminant(&err),
                std::mem::discriminant(&check),
                "status {} classified as {:?}",
                status,
                err
            );
            assert!(!err.is_transport());
        }
    }

    #[tokio::test]
    async fn test_null_body_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let api = test_api(&server);
        assert!(api.latest("en", "us").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let api = test_api(&server);
        let err = api.latest("en", "us").await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Nothing listens on this port
        let config = Config {
            api_key: None,
            base_url: "http://127.0.0.1:1/".to_string(),
            page_size: 10,
            request_timeout_secs: 5,
            chars_per_minute: 200,
        };
        let api = NewsApi::new(&config).unwrap();

        let err = api.latest("en", "us").await.unwrap_err();
        assert!(err.is_transport());
    }
}
