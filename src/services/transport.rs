//! Network seam for list requests
//!
//! [`Transport`] performs one GET and hands back the raw status and body; the
//! controller owns status mapping and envelope decoding. [`HttpTransport`] is
//! the reqwest-backed implementation used against the real backend.

use async_trait::async_trait;
use reqwest::{header, Client, Url};

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult, FetchError},
    session::Credential,
};

/// One list request, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    /// Path relative to the backend root, e.g. `/api/books`
    pub path: String,
    /// Query pairs in the order they are sent
    pub query: Vec<(String, String)>,
    /// Sent as `Authorization: Bearer ...` when present
    pub bearer: Option<Credential>,
}

impl ResourceRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response of a completed call, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request.
    ///
    /// Only connectivity problems (refused connection, timeout, broken body)
    /// are errors here, reported as [`FetchError::Network`]. A non-2xx status
    /// is a normal response.
    async fn get(&self, request: ResourceRequest) -> Result<TransportResponse, FetchError>;
}

/// Reqwest transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::network(format!("invalid request path {}: {}", path, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: ResourceRequest) -> Result<TransportResponse, FetchError> {
        let url = self.url_for(&request.path)?;
        tracing::debug!("GET {} {:?}", url, request.query);

        let mut builder = self
            .client
            .get(url)
            .query(&request.query)
            .header(header::ACCEPT, "application/json");
        if let Some(credential) = &request.bearer {
            builder = builder.bearer_auth(credential.bearer());
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::network(format!("request timed out: {}", error))
    } else {
        FetchError::network(error.to_string())
    }
}

/// Whitespace-collapsed, length-limited rendering of a body for log lines.
pub(crate) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..ApiConfig::default()
        };
        assert!(matches!(HttpTransport::new(&config), Err(AppError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_for_joins_path() {
        let transport = HttpTransport::new(&ApiConfig::default()).unwrap();
        let url = transport.url_for("/api/messages/search/findByClosed").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/messages/search/findByClosed"
        );
    }

    #[test]
    fn test_body_preview_truncates() {
        assert_eq!(body_preview(b"{\n  \"error\":   \"Unauthorized\"\n}"), "{ \"error\": \"Unauthorized\" }");
        let long = "x".repeat(400);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 2,
            ..ApiConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        let error = transport
            .get(ResourceRequest {
                path: "/api/books".to_string(),
                query: vec![],
                bearer: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(error, FetchError::Network(_)));
    }
}
