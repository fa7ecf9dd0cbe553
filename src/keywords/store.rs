//! Keyword Store
//!
//! Every mutation writes the full list to local storage first, then pushes
//! it to the server and asks for a refresh. A failed push is returned to the
//! caller; the local write stands.

use crate::api::{ApiError, ContentApi};
use crate::storage::{LocalStorage, StorageError, TRACKED_KEYWORDS_KEY};
use std::sync::Arc;
use thiserror::Error;

/// Errors from keyword operations
#[derive(Error, Debug)]
pub enum KeywordError {
    /// Input was empty after trimming
    #[error("Enter a keyword")]
    EmptyInput,

    /// Keyword is already tracked (case-sensitive)
    #[error("'{0}' is already tracked")]
    DuplicateKeyword(String),

    /// Keyword to remove is not tracked
    #[error("'{0}' is not tracked")]
    NotTracked(String),

    /// Local storage write failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Server sync failed
    #[error("Failed to sync keywords: {0}")]
    Api(#[from] ApiError),
}

/// Out-of-band user confirmation for destructive actions
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// An answer collected before the call, e.g. from a `--yes` flag
impl Confirm for bool {
    fn confirm(&self, _prompt: &str) -> bool {
        *self
    }
}

/// The tracked keyword list
pub struct KeywordStore {
    storage: Box<dyn LocalStorage>,
    api: Arc<dyn ContentApi>,
    keywords: Vec<String>,
}

impl KeywordStore {
    /// Load the persisted list; missing or corrupt data yields an empty list
    pub fn load(storage: Box<dyn LocalStorage>, api: Arc<dyn ContentApi>) -> Self {
        let keywords = match storage.get_item(TRACKED_KEYWORDS_KEY) {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored keyword list is corrupt, starting empty");
                    Vec::new()
                }
            },
        };

        tracing::debug!(count = keywords.len(), "Tracked keywords loaded");

        Self {
            storage,
            api,
            keywords,
        }
    }

    /// Tracked keywords in insertion order
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }

    /// Check user input without mutating; returns the trimmed keyword
    pub fn validate(&self, input: &str) -> Result<String, KeywordError> {
        let keyword = input.trim();
        if keyword.is_empty() {
            return Err(KeywordError::EmptyInput);
        }
        if self.contains(keyword) {
            return Err(KeywordError::DuplicateKeyword(keyword.to_string()));
        }
        Ok(keyword.to_string())
    }

    /// Track a new keyword and persist the list
    ///
    /// The keyword is only tracked once the local write succeeds.
    pub async fn add(&mut self, input: &str) -> Result<String, KeywordError> {
        let keyword = self.validate(input)?;

        let mut next = self.keywords.clone();
        next.push(keyword.clone());
        self.commit(next)?;
        tracing::info!(keyword = %keyword, "Keyword added");

        self.push().await?;
        Ok(keyword)
    }

    /// Stop tracking a keyword once `confirm` agrees
    ///
    /// Returns `Ok(false)` if the user declined; nothing changes in that case.
    pub async fn remove(&mut self, keyword: &str, confirm: &dyn Confirm) -> Result<bool, KeywordError> {
        let Some(index) = self.keywords.iter().position(|k| k == keyword) else {
            return Err(KeywordError::NotTracked(keyword.to_string()));
        };

        if !confirm.confirm(&format!("Stop tracking '{}'?", keyword)) {
            tracing::debug!(keyword, "Keyword removal declined");
            return Ok(false);
        }

        let mut next = self.keywords.clone();
        next.remove(index);
        self.commit(next)?;
        tracing::info!(keyword, "Keyword removed");

        self.push().await?;
        Ok(true)
    }

    /// Write the current list locally, then push it to the server and
    /// request a refresh
    pub async fn persist(&mut self) -> Result<(), KeywordError> {
        self.commit(self.keywords.clone())?;
        self.push().await
    }

    /// Save `next` to local storage and adopt it; on failure nothing changes
    fn commit(&mut self, next: Vec<String>) -> Result<(), KeywordError> {
        let json = serde_json::to_string(&next).map_err(StorageError::from)?;
        self.storage.set_item(TRACKED_KEYWORDS_KEY, &json)?;
        self.keywords = next;
        Ok(())
    }

    async fn push(&self) -> Result<(), KeywordError> {
        self.api.push_keywords(&self.keywords).await?;
        self.api.request_refresh(&self.keywords).await?;

        tracing::debug!(count = self.keywords.len(), "Keywords synced to server");
        Ok(())
    }
}
