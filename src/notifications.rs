//! Transient Notifications
//!
//! On-screen messages that dismiss themselves after a fixed delay. Sync and
//! keyword failures land here instead of aborting anything.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A single message shown to the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Queue of live notifications
#[derive(Debug)]
pub struct Notifications {
    items: VecDeque<Notification>,
    dismiss_after: Duration,
    next_id: u64,
}

impl Notifications {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            dismiss_after,
            next_id: 1,
        }
    }

    /// Raise a notification, returning its id
    pub fn push(&mut self, level: Level, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        match level {
            Level::Info => tracing::info!(id, message = %message, "Notification"),
            Level::Error => tracing::warn!(id, message = %message, "Error notification"),
        }

        self.items.push_back(Notification {
            id,
            level,
            message,
            expires_at: Instant::now() + self.dismiss_after,
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Info, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Level::Error, message)
    }

    /// Notifications that have not expired yet, oldest first
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| !n.is_expired(now))
    }

    /// Drop expired notifications, returning how many were removed
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        self.items.retain(|n| !n.is_expired(now));
        before - self.items.len()
    }

    /// When the next notification expires
    pub fn next_expiry(&self) -> Option<Instant> {
        self.items.iter().map(|n| n.expires_at).min()
    }

    /// Number of notifications still queued, expired or not
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of queued error notifications
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|n| n.level == Level::Error).count()
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss() {
        let mut notices = Notifications::new(Duration::from_secs(3));
        notices.error("Failed to load content");

        assert_eq!(notices.active(Instant::now()).count(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(notices.prune(Instant::now()), 0);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(notices.active(Instant::now()).count(), 0);
        assert_eq!(notices.prune(Instant::now()), 1);
        assert!(notices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_expiry_is_oldest() {
        let mut notices = Notifications::new(Duration::from_secs(3));
        let start = Instant::now();
        notices.info("first");
        tokio::time::advance(Duration::from_secs(1)).await;
        notices.info("second");

        assert_eq!(notices.next_expiry(), Some(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_ids_and_counts() {
        let mut notices = Notifications::default();
        let a = notices.info("saved");
        let b = notices.error("failed");

        assert_ne!(a, b);
        assert_eq!(notices.len(), 2);
        assert_eq!(notices.error_count(), 1);
    }
}
