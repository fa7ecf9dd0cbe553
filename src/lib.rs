//! # Trendboard
//!
//! A terminal dashboard for tracking news articles and videos by keyword.
//! Content is collected by a remote service; this crate keeps the tracked
//! keyword list, reads and refreshes content, and renders it.
//!
//! ## Modules
//!
//! - [`api`]: HTTP client for the content service
//! - [`content`]: content types and the per-keyword cache
//! - [`keywords`]: the tracked keyword list
//! - [`sync`]: refresh orchestration and recurring timers
//! - [`view`]: view model and terminal renderer
//! - [`presenter`]: page state machine and the dashboard event loop
//! - [`theme`], [`notifications`], [`storage`]: persisted preferences,
//!   transient messages and local key/value state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trendboard::api::{ClientConfig, HttpContentClient};
//! use trendboard::content::ContentCache;
//! use trendboard::notifications::Notifications;
//! use trendboard::sync::{RefreshWait, SyncController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(HttpContentClient::new(ClientConfig::default())?);
//!     let sync = SyncController::new(api, RefreshWait::default());
//!
//!     let mut cache = ContentCache::new();
//!     let mut notices = Notifications::default();
//!     let tracked = vec!["NewJeans".to_string()];
//!
//!     sync.load_all(&tracked, true, &mut cache, &mut notices).await?;
//!     println!("{} items cached", cache.total_items());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod content;
pub mod keywords;
pub mod logging;
pub mod notifications;
pub mod presenter;
pub mod storage;
pub mod sync;
pub mod theme;
pub mod view;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, ClientConfig, ContentApi, HttpContentClient};

pub use config::{Config, ConfigError, LoggingConfig};

pub use content::{ContentBundle, ContentCache, ContentItem, ContentType, TypeFilter};

pub use keywords::{KeywordError, KeywordStore};

pub use notifications::{Level, Notification, Notifications};

pub use presenter::{Command, Dashboard, Page, Selection, TimerSettings};

pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError, StorageResult};

pub use sync::{RecurringTimer, RefreshWait, SyncController};

pub use theme::{Theme, ThemeParseError, ThemeStore};

pub use view::{RenderedView, TerminalRenderer};
