//! Content Synchronization
//!
//! Keeps the [`ContentCache`](crate::content::ContentCache) in step with the
//! content service.
//!
//! ## Architecture
//!
//! - **SyncController**: on-demand full and per-keyword loads, with optional
//!   server-side refresh first
//! - **RefreshWait**: how to wait for the server's background collection
//! - **RecurringTimer**: cancelable interval tasks for auto-refresh and
//!   status checks
//!
//! ## Data Flow
//!
//! 1. A force refresh posts the keyword list to `/api/refresh`
//! 2. The server collects in the background; the controller waits per [`RefreshWait`]
//! 3. The controller reads `/api/content` and writes the cache
//! 4. Failures become one transient notification; the cache is untouched

mod controller;
mod timers;

pub use controller::{RefreshWait, SyncController, DEFAULT_KEYWORDS};
pub use timers::RecurringTimer;
