//! Content Model
//!
//! Types for the news/video items returned by the content API and the
//! in-memory cache that every view is rendered from.
//!
//! - **types**: `ContentItem`, `ContentBundle`, `ContentType`, `TypeFilter`
//! - **cache**: `ContentCache`, keyword → bundle in insertion order

mod cache;
mod types;

pub use cache::ContentCache;
pub(crate) use types::content_id;
pub use types::{ContentBundle, ContentItem, ContentType, TypeFilter, TypeFilterParseError};
