// HTTP client for the Brave Search API

use crate::endpoint::Endpoint;
use crate::error::{ApiError, Result};
use crate::limiter::RateLimiter;
use crate::types::{
    ImageSearchResponse, LocalDescriptionsResponse, NewsSearchResponse, SummarizerResponse,
    VideoSearchResponse, WebSearchResponse,
};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, CONTENT_TYPE};
use serde_json::{json, Map, Value};
use std::time::Duration;

/// Request header carrying the API credential.
pub const SUBSCRIPTION_TOKEN_HEADER: &str = "x-subscription-token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An image fetched from the open web, ready to be embedded in a tool
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub data: String,
}

/// The typed surface the tools call. Implemented by [`BraveApi`] for
/// production and by stubs in tests.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn web_search(&self, params: Map<String, Value>) -> Result<WebSearchResponse>;
    async fn image_search(&self, params: Map<String, Value>) -> Result<ImageSearchResponse>;
    async fn video_search(&self, params: Map<String, Value>) -> Result<VideoSearchResponse>;
    async fn news_search(&self, params: Map<String, Value>) -> Result<NewsSearchResponse>;
    async fn local_descriptions(&self, ids: Vec<String>) -> Result<LocalDescriptionsResponse>;
    async fn summarize(&self, params: Map<String, Value>) -> Result<SummarizerResponse>;
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage>;
}

/// Client for the hosted Brave Search API.
///
/// Owns its rate limiter: every request is checked against the configured
/// ceilings immediately before it goes out.
pub struct BraveApi {
    http: reqwest::Client,
    api_key: String,
    limiter: RateLimiter,
}

impl BraveApi {
    pub fn new(api_key: impl Into<String>, limiter: RateLimiter) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("brave-search-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            limiter,
        })
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        if let Ok(token) = HeaderValue::from_str(&self.api_key) {
            headers.insert(
                HeaderName::from_static(SUBSCRIPTION_TOKEN_HEADER),
                token,
            );
        }

        headers
    }

    /// Issue a GET request against `endpoint`, encoding `params` per the
    /// endpoint's query-string rules. Per-call `extra_headers` override the
    /// defaults on key collision.
    pub async fn issue_request(
        &self,
        endpoint: Endpoint,
        params: &Map<String, Value>,
        extra_headers: HeaderMap,
    ) -> Result<Value> {
        self.limiter.check()?;

        let url = endpoint.url();
        tracing::info!(%endpoint, "preparing to issue request to {url}");

        let pairs = endpoint.encode(params);
        tracing::debug!(%endpoint, query = %format_pairs(&pairs), "using parameters");

        let mut headers = self.default_headers();
        headers.extend(extra_headers);

        let response = self
            .http
            .get(&url)
            .query(&pairs)
            .headers(headers)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                body: prettify_error_body(&text),
            };
            tracing::error!(%endpoint, "{error}");
            return Err(error);
        }

        let body: Value = response.json().await?;
        tracing::debug!(%endpoint, "received response from {url}");

        Ok(body)
    }
}

#[async_trait]
impl SearchApi for BraveApi {
    async fn web_search(&self, params: Map<String, Value>) -> Result<WebSearchResponse> {
        let body = self
            .issue_request(Endpoint::Web, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn image_search(&self, params: Map<String, Value>) -> Result<ImageSearchResponse> {
        let body = self
            .issue_request(Endpoint::Images, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn video_search(&self, params: Map<String, Value>) -> Result<VideoSearchResponse> {
        let body = self
            .issue_request(Endpoint::Videos, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn news_search(&self, params: Map<String, Value>) -> Result<NewsSearchResponse> {
        let body = self
            .issue_request(Endpoint::News, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn local_descriptions(&self, ids: Vec<String>) -> Result<LocalDescriptionsResponse> {
        let params = ids_params(ids);
        let body = self
            .issue_request(Endpoint::LocalDescriptions, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn summarize(&self, params: Map<String, Value>) -> Result<SummarizerResponse> {
        let body = self
            .issue_request(Endpoint::Summarizer, &params, HeaderMap::new())
            .await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn fetch_image(&self, url: &str) -> Result<FetchedImage> {
        tracing::info!("fetching image data from {url}");

        let response = self.http.get(url).send().await?;
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await?;

        Ok(FetchedImage {
            mime_type,
            data: BASE64.encode(&bytes),
        })
    }
}

fn ids_params(ids: Vec<String>) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert("ids".to_string(), json!(ids));
    params
}

/// Pretty-print an error body when it parses as JSON, otherwise pass the
/// raw text through.
fn prettify_error_body(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string())
        }
        Err(_) => text.to_string(),
    }
}

fn format_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
