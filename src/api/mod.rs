//! Content API Client
//!
//! Client side of the remote content service. The service itself (collectors,
//! scheduling, caching on the server) is not part of this crate.
//!
//! # Endpoints consumed
//!
//! ## Content
//! - `GET /api/content` - Keyword → bundle mapping for every cached keyword
//! - `GET /api/content?keyword=K` - Bundle for one keyword
//!
//! ## Collection
//! - `POST /api/refresh` - Start server-side collection for a keyword list
//! - `POST /api/keywords` - Replace the server-side tracked keyword list
//!
//! ## Diagnostics
//! - `GET /api/status` - Service state and API key configuration
//!
//! ## Moderation
//! - `GET /api/admin/blacklist` - Blocked content ids and URLs
//! - `POST /api/admin/block` - Block an item
//! - `POST /api/admin/unblock` - Unblock an item
//!
//! The [`ContentApi`] trait covers everything the dashboard needs so the
//! sync layer can run against [`HttpContentClient`] or a test double.

pub mod client;
pub mod dto;
pub mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{ClientConfig, ContentApi, HttpContentClient};
pub use dto::{ApiKeyStatus, Blacklist, BlockRequest, BlockResponse, RefreshResponse, ServiceStatus};
pub use error::{ApiError, ApiResult};
