//! HTTP Client
//!
//! The single request engine: builds one request from a configuration
//! snapshot and issues it. No retries, no timeouts, no caching.

use crate::api::{Params, Reply};
use crate::client::encoding::{encode_pairs, FORM_CONTENT_TYPE};
use crate::client::status::uses_body;
use crate::config::{ClientConfig, Resource};
use crate::error::{FunderError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Url};

/// A fully built request, ready to send
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// Form-encoded parameters for methods that carry a body
    pub body: Option<String>,
}

impl PreparedRequest {
    /// Build a request for `resource` from a configuration snapshot
    pub fn build(
        config: &ClientConfig,
        method: Method,
        resource: Resource,
        params: &Params,
    ) -> Result<Self> {
        let resource_url = config.resource_url(resource).ok_or_else(|| {
            FunderError::Config(format!("base URL is not set (requesting {})", resource))
        })?;

        let merged = params.merged_with(&config.adhoc_fields);
        let encoded = encode_pairs(merged.to_pairs());

        let (url, body) = if uses_body(&method) {
            (resource_url, Some(encoded))
        } else if encoded.is_empty() {
            (resource_url, None)
        } else {
            (format!("{}?{}", resource_url, encoded), None)
        };

        let url = Url::parse(&url)
            .map_err(|e| FunderError::Config(format!("Invalid request URL '{}': {}", url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        for (key, value) in &config.adhoc_headers {
            let name = HeaderName::try_from(key.as_str())
                .map_err(|e| FunderError::Config(format!("Invalid header name '{}': {}", key, e)))?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                FunderError::Config(format!("Invalid value for header '{}': {}", key, e))
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

/// A response whose body has been read but not yet decoded
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,
    pub text: String,
}

impl RawReply {
    /// Decode the body as JSON
    pub fn into_reply(self) -> Result<Reply> {
        let body = serde_json::from_str(&self.text).map_err(|e| FunderError::MalformedResponse {
            status: self.status,
            message: e.to_string(),
        })?;
        Ok(Reply::new(self.status, body))
    }
}

/// HTTP transport shared by the async and blocking clients
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| FunderError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Issue exactly one request and read its body.
    ///
    /// Any failure before the body is fully read is reported as
    /// [`FunderError::Unavailable`].
    pub async fn send(&self, request: PreparedRequest) -> Result<RawReply> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        tracing::debug!(status, bytes = text.len(), "received response");

        Ok(RawReply { status, text })
    }
}
