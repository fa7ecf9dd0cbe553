//! Content types
//!
//! Wire shapes of the content API. Identity is structural: two items are the
//! same item when every field matches.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of a content item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    News,
    Video,
    /// Any type this client does not know; only shown under the `all` filter
    #[serde(other)]
    Unknown,
}

impl ContentType {
    /// Badge text shown on a card
    pub fn badge(&self) -> &'static str {
        match self {
            ContentType::News => "Article",
            ContentType::Video => "Video",
            ContentType::Unknown => "Item",
        }
    }
}

/// A single news article or video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    pub url: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at_formatted: Option<String>,
}

impl ContentItem {
    pub fn new(kind: ContentType, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            url: url.into(),
            thumbnail: None,
            channel: None,
            source: None,
            description: None,
            published_at: None,
            published_at_formatted: None,
        }
    }

    /// Set the channel (videos)
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the source (articles)
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the human-readable publication time
    pub fn published(mut self, formatted: impl Into<String>) -> Self {
        self.published_at_formatted = Some(formatted.into());
        self
    }

    /// Where the item came from: channel, then source, then "Unknown"
    pub fn source_label(&self) -> &str {
        self.channel
            .as_deref()
            .or(self.source.as_deref())
            .unwrap_or("Unknown")
    }

    /// Id used by the server's moderation blacklist: md5 of `title|url`
    pub fn content_id(&self) -> String {
        content_id(&self.title, &self.url)
    }
}

/// Compute a moderation content id from a title and URL
pub(crate) fn content_id(title: &str, url: &str) -> String {
    format!("{:x}", md5::compute(format!("{}|{}", title, url)))
}

/// Treat `""` the same as a missing field
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// All content fetched for one keyword
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default)]
    pub contents: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_count: Option<u64>,
}

impl ContentBundle {
    pub fn new(contents: Vec<ContentItem>) -> Self {
        Self {
            contents,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Number of items of one kind
    pub fn count_of(&self, kind: ContentType) -> usize {
        self.contents.iter().filter(|c| c.kind == kind).count()
    }
}

/// Client-side type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    News,
    Video,
}

impl TypeFilter {
    pub fn matches(&self, kind: ContentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::News => kind == ContentType::News,
            TypeFilter::Video => kind == ContentType::Video,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::News => "news",
            TypeFilter::Video => "video",
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter '{0}', expected all, news or video")]
pub struct TypeFilterParseError(pub String);

impl FromStr for TypeFilter {
    type Err = TypeFilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "news" | "article" | "articles" => Ok(TypeFilter::News),
            "video" | "videos" => Ok(TypeFilter::Video),
            other => Err(TypeFilterParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_server_item() {
        let json = r#"{
            "title": "BTS comeback stage",
            "description": "",
            "url": "https://www.youtube.com/watch?v=abc",
            "thumbnail": "",
            "channel": "HYBE LABELS",
            "published_at": "2024-06-01T10:00:00Z",
            "published_at_formatted": "3시간 전",
            "source": "youtube",
            "type": "video"
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ContentType::Video);
        assert!(item.thumbnail.is_none());
        assert_eq!(item.source_label(), "HYBE LABELS");
        assert_eq!(item.published_at_formatted.as_deref(), Some("3시간 전"));
    }

    #[test]
    fn test_source_label_fallbacks() {
        let news = ContentItem::new(ContentType::News, "t", "u").source("https://news.example");
        assert_eq!(news.source_label(), "https://news.example");

        let bare: ContentItem =
            serde_json::from_str(r#"{"type":"news","title":"t","url":"u","channel":"","source":""}"#)
                .unwrap();
        assert_eq!(bare.source_label(), "Unknown");
    }

    #[test]
    fn test_unknown_type() {
        let item: ContentItem =
            serde_json::from_str(r#"{"type":"podcast","title":"t","url":"u"}"#).unwrap();
        assert_eq!(item.kind, ContentType::Unknown);
        assert!(TypeFilter::All.matches(item.kind));
        assert!(!TypeFilter::News.matches(item.kind));
        assert!(!TypeFilter::Video.matches(item.kind));
    }

    #[test]
    fn test_bundle_missing_contents() {
        let bundle: ContentBundle = serde_json::from_str(r#"{"keyword":"IVE"}"#).unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.keyword.as_deref(), Some("IVE"));
    }

    #[test]
    fn test_content_id() {
        let item = ContentItem::new(ContentType::News, "a", "b");
        let id = item.content_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, content_id("a", "b"));
        assert_ne!(id, content_id("a", "c"));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("video".parse::<TypeFilter>().unwrap(), TypeFilter::Video);
        assert_eq!(" News ".parse::<TypeFilter>().unwrap(), TypeFilter::News);
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert!("shorts".parse::<TypeFilter>().is_err());
    }
}
