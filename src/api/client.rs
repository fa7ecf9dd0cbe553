//! Content API REST Client
//!
//! HTTP client for the content service, plus the [`ContentApi`] trait the
//! rest of the crate programs against.

use super::dto::{Blacklist, BlockRequest, BlockResponse, KeywordsRequest, RefreshResponse, ServiceStatus};
use super::error::{ApiError, ApiResult};
use crate::content::ContentBundle;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Operations the dashboard performs against the content service
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Every cached keyword with its bundle, in server order
    async fn fetch_all(&self) -> ApiResult<Vec<(String, ContentBundle)>>;

    /// Bundle for a single keyword
    async fn fetch_keyword(&self, keyword: &str) -> ApiResult<ContentBundle>;

    /// Ask the server to collect fresh content; collection runs in the
    /// background after the response
    async fn request_refresh(&self, keywords: &[String]) -> ApiResult<RefreshResponse>;

    /// Replace the server-side tracked keyword list
    async fn push_keywords(&self, keywords: &[String]) -> ApiResult<()>;

    /// Service diagnostics
    async fn status(&self) -> ApiResult<ServiceStatus>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the content service (e.g., "http://127.0.0.1:5000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

/// reqwest-backed [`ContentApi`]
pub struct HttpContentClient {
    client: Client,
    config: ClientConfig,
}

impl HttpContentClient {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let config = ClientConfig {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            ..config
        };

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        decode(check(response).await?).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> ApiResult<Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        check(response).await
    }

    /// Current moderation blacklist
    pub async fn blacklist(&self) -> ApiResult<Blacklist> {
        self.get(&self.url("/api/admin/blacklist")).await
    }

    /// Block an item by content id and/or URL
    pub async fn block(&self, request: &BlockRequest) -> ApiResult<BlockResponse> {
        let request = request.clone().with_derived_id();
        if !request.is_valid() {
            return Err(ApiError::InvalidRequest(
                "content_id or url is required".to_string(),
            ));
        }

        let response = self.post(&self.url("/api/admin/block"), &request).await?;
        decode(response).await
    }

    /// Remove an item from the blacklist
    pub async fn unblock(&self, request: &BlockRequest) -> ApiResult<BlockResponse> {
        if !request.is_valid() {
            return Err(ApiError::InvalidRequest(
                "content_id or url is required".to_string(),
            ));
        }

        let response = self.post(&self.url("/api/admin/unblock"), request).await?;
        decode(response).await
    }
}

#[async_trait]
impl ContentApi for HttpContentClient {
    async fn fetch_all(&self) -> ApiResult<Vec<(String, ContentBundle)>> {
        let map: serde_json::Map<String, serde_json::Value> =
            self.get(&self.url("/api/content")).await?;

        map.into_iter()
            .map(|(keyword, value)| {
                let bundle: ContentBundle = serde_json::from_value(value)?;
                Ok((keyword, bundle))
            })
            .collect()
    }

    async fn fetch_keyword(&self, keyword: &str) -> ApiResult<ContentBundle> {
        let url = format!(
            "{}?keyword={}",
            self.url("/api/content"),
            urlencoding::encode(keyword)
        );
        self.get(&url).await
    }

    async fn request_refresh(&self, keywords: &[String]) -> ApiResult<RefreshResponse> {
        let response = self
            .post(&self.url("/api/refresh"), &KeywordsRequest { keywords })
            .await?;
        let refresh: RefreshResponse = decode(response).await?;

        tracing::debug!(
            keywords = ?keywords,
            status = refresh.status.as_deref().unwrap_or("-"),
            "Refresh requested"
        );
        Ok(refresh)
    }

    async fn push_keywords(&self, keywords: &[String]) -> ApiResult<()> {
        self.post(&self.url("/api/keywords"), &KeywordsRequest { keywords })
            .await?;
        Ok(())
    }

    async fn status(&self) -> ApiResult<ServiceStatus> {
        self.get(&self.url("/api/status")).await
    }
}

/// Turn a non-success status into [`ApiError::Http`]
async fn check(response: Response) -> ApiResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Err(ApiError::Http {
            status: status.as_u16(),
            message: text,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text().await.map_err(ApiError::from_transport)?;
    Ok(serde_json::from_str(&body)?)
}
