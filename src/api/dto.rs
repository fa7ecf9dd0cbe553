//! Data Transfer Objects
//!
//! Request and response bodies of the content API that are not content
//! themselves (see [`crate::content`] for bundles and items).

use serde::{Deserialize, Serialize};

// ============================================
// COLLECTION DTOs
// ============================================

/// Body of `POST /api/refresh` and `POST /api/keywords`
#[derive(Debug, Serialize)]
pub struct KeywordsRequest<'a> {
    pub keywords: &'a [String],
}

/// Response of `POST /api/refresh`
///
/// Only success or failure matters to the client; the body is kept for
/// logging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Keywords the server will collect; may be strings or normalized objects
    #[serde(default)]
    pub keywords: Vec<serde_json::Value>,
    /// "collecting" while the server works in the background
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================
// STATUS DTOs
// ============================================

/// Response of `GET /api/status`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub update_interval_minutes: Option<u64>,
    #[serde(default)]
    pub cached_keywords: Vec<String>,
    #[serde(default)]
    pub total_cached_contents: Option<u64>,
    /// Unix time in seconds
    #[serde(default)]
    pub last_update: Option<f64>,
    #[serde(default)]
    pub api_keys: ApiKeyStatus,
}

/// Which upstream API keys the server has configured
///
/// Each value is `"missing"` or some other marker meaning present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiKeyStatus {
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub naver_id: String,
    #[serde(default)]
    pub naver_secret: String,
}

impl ApiKeyStatus {
    /// Names of keys reported as missing
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("youtube", &self.youtube),
            ("naver_id", &self.naver_id),
            ("naver_secret", &self.naver_secret),
        ]
        .into_iter()
        .filter(|(_, state)| state.as_str() == "missing")
        .map(|(name, _)| name)
        .collect()
    }
}

// ============================================
// MODERATION DTOs
// ============================================

/// Response of `GET /api/admin/blacklist`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Blacklist {
    #[serde(default)]
    pub blocked_ids: Vec<String>,
    #[serde(default)]
    pub blocked_urls: Vec<String>,
}

/// Body of `POST /api/admin/block` and `POST /api/admin/unblock`
#[derive(Debug, Clone, Default, Serialize)]
pub struct BlockRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BlockRequest {
    /// Fill in `content_id` from title and URL when only those are known,
    /// using the same hash as [`ContentItem::content_id`](crate::content::ContentItem::content_id)
    pub fn with_derived_id(mut self) -> Self {
        if self.content_id.is_none() {
            if let (Some(title), Some(url)) = (&self.title, &self.url) {
                self.content_id = Some(crate::content::content_id(title, url));
            }
        }
        self
    }

    /// A request must identify the item by id or URL
    pub fn is_valid(&self) -> bool {
        self.content_id.is_some() || self.url.is_some()
    }
}

/// Response of the block/unblock endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct BlockResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub blacklist: Blacklist,
}
