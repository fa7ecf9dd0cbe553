//! Local Storage
//!
//! Persistent key/value storage for the small amount of state that
//! survives between sessions:
//!
//! - **theme**: the `light`/`dark` preference
//! - **trackedKeywords**: JSON array of tracked keywords
//!
//! # Backends
//!
//! - [`FileStorage`]: a single JSON object file under the data directory
//! - [`MemoryStorage`]: in-process map, used by tests
//!
//! # Example
//!
//! ```rust,no_run
//! use trendboard::storage::{FileStorage, LocalStorage, THEME_KEY};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut storage = FileStorage::new("./trendboard_data");
//!     storage.set_item(THEME_KEY, "dark")?;
//!     assert_eq!(storage.get_item(THEME_KEY).as_deref(), Some("dark"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod local;

pub use error::{StorageError, StorageResult};
pub use local::{FileStorage, LocalStorage, MemoryStorage, THEME_KEY, TRACKED_KEYWORDS_KEY};
