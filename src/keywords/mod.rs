//! Tracked Keywords
//!
//! The user's keyword list: validated locally, persisted to local storage
//! and mirrored to the content service.

mod store;

pub use store::{Confirm, KeywordError, KeywordStore};
