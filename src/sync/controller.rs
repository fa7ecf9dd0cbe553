//! Sync Controller
//!
//! Orchestrates refresh and read calls against the content API.
//!
//! The controller holds no content state itself. The caller owns the cache
//! and the notification queue and lends them for the duration of a call, so
//! all shared state stays confined to the presenter's task.

use crate::api::{ApiResult, ContentApi, ServiceStatus};
use crate::content::{ContentBundle, ContentCache};
use crate::notifications::Notifications;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Keywords refreshed when the user tracks none
pub const DEFAULT_KEYWORDS: [&str; 2] = ["BTS", "BLACKPINK"];

/// How to wait for server-side collection after a refresh request
///
/// The server acknowledges a refresh immediately and collects in the
/// background without signalling completion, so neither strategy is a
/// guarantee that collection has finished.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshWait {
    /// Sleep a fixed delay, then read once
    Fixed(Duration),
    /// Re-read every `interval` until the content differs from what is
    /// cached, giving up after `timeout`
    PollUntilChanged { interval: Duration, timeout: Duration },
}

impl Default for RefreshWait {
    fn default() -> Self {
        RefreshWait::PollUntilChanged {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
        }
    }
}

/// Orchestrates fetch/refresh calls against the content API
pub struct SyncController {
    api: Arc<dyn ContentApi>,
    wait: RefreshWait,
}

impl SyncController {
    pub fn new(api: Arc<dyn ContentApi>, wait: RefreshWait) -> Self {
        Self { api, wait }
    }

    pub fn refresh_wait(&self) -> &RefreshWait {
        &self.wait
    }

    /// Keywords sent with a refresh: the tracked list, or the defaults
    pub fn refresh_keywords(tracked: &[String]) -> Vec<String> {
        if tracked.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
        } else {
            tracked.to_vec()
        }
    }

    /// Reload every keyword and rebuild the cache
    ///
    /// Returns the number of keywords now cached. On failure one error
    /// notification is raised and the cache keeps its previous content.
    pub async fn load_all(
        &self,
        tracked: &[String],
        force_refresh: bool,
        cache: &mut ContentCache,
        notices: &mut Notifications,
    ) -> ApiResult<usize> {
        match self.fetch_all(tracked, force_refresh).await {
            Ok(entries) => {
                cache.replace_all(entries);
                tracing::info!(
                    keywords = cache.len(),
                    items = cache.total_items(),
                    force_refresh,
                    "Content loaded"
                );
                Ok(cache.len())
            }
            Err(e) => {
                tracing::error!(error = %e, force_refresh, "Failed to load content");
                notices.error(format!("Failed to load content: {}", e));
                Err(e)
            }
        }
    }

    /// Reload a single keyword and patch its cache entry
    ///
    /// A refresh still carries the whole tracked list so the server does not
    /// narrow its tracked set to this one keyword.
    pub async fn load_one(
        &self,
        tracked: &[String],
        keyword: &str,
        force_refresh: bool,
        cache: &mut ContentCache,
        notices: &mut Notifications,
    ) -> ApiResult<ContentBundle> {
        match self.fetch_one(tracked, keyword, force_refresh).await {
            Ok(bundle) => {
                tracing::info!(keyword, items = bundle.len(), force_refresh, "Keyword content loaded");
                cache.set(keyword, bundle.clone());
                Ok(bundle)
            }
            Err(e) => {
                tracing::error!(keyword, error = %e, force_refresh, "Failed to load keyword content");
                notices.error(format!("Failed to load content for {}: {}", keyword, e));
                Err(e)
            }
        }
    }

    /// Query service diagnostics and log them
    ///
    /// Failures are logged only; this never notifies the user.
    pub async fn check_status(&self) -> ApiResult<ServiceStatus> {
        match self.api.status().await {
            Ok(status) => {
                tracing::info!(
                    status = %status.status,
                    cached_keywords = status.cached_keywords.len(),
                    total_cached_contents = status.total_cached_contents.unwrap_or(0),
                    "Service status"
                );
                for key in status.api_keys.missing() {
                    tracing::warn!(key, "Content service is missing an API key");
                }
                Ok(status)
            }
            Err(e) => {
                tracing::error!(error = %e, "Status check failed");
                Err(e)
            }
        }
    }

    async fn fetch_all(
        &self,
        tracked: &[String],
        force_refresh: bool,
    ) -> ApiResult<Vec<(String, ContentBundle)>> {
        if !force_refresh {
            return self.api.fetch_all().await;
        }

        let baseline = self.baseline(self.api.fetch_all()).await?;
        self.api
            .request_refresh(&Self::refresh_keywords(tracked))
            .await?;

        self.read_after_refresh(
            || self.api.fetch_all(),
            |entries: &Vec<(String, ContentBundle)>| baseline.as_ref() == Some(entries),
        )
        .await
    }

    async fn fetch_one(
        &self,
        tracked: &[String],
        keyword: &str,
        force_refresh: bool,
    ) -> ApiResult<ContentBundle> {
        if !force_refresh {
            return self.api.fetch_keyword(keyword).await;
        }

        let mut keywords = Self::refresh_keywords(tracked);
        if !keywords.iter().any(|k| k == keyword) {
            keywords.push(keyword.to_string());
        }

        let baseline = self.baseline(self.api.fetch_keyword(keyword)).await?;
        self.api.request_refresh(&keywords).await?;

        self.read_after_refresh(
            || self.api.fetch_keyword(keyword),
            |bundle: &ContentBundle| baseline.as_ref() == Some(bundle),
        )
        .await
    }

    /// What the server serves before a refresh, when polling needs it
    ///
    /// The local cache is not a usable baseline: it may be empty or lack the
    /// keyword, which would make the first read look collected.
    async fn baseline<T, Fut>(&self, read: Fut) -> ApiResult<Option<T>>
    where
        Fut: std::future::Future<Output = ApiResult<T>>,
    {
        match self.wait {
            RefreshWait::Fixed(_) => Ok(None),
            RefreshWait::PollUntilChanged { .. } => read.await.map(Some),
        }
    }

    /// Wait for collection according to [`RefreshWait`], then read
    ///
    /// `unchanged` reports whether a read still equals the pre-refresh state.
    async fn read_after_refresh<T, F, Fut, U>(&self, read: F, unchanged: U) -> ApiResult<T>
    where
        F: Fn() -> Fut,
        U: Fn(&T) -> bool,
        Fut: std::future::Future<Output = ApiResult<T>>,
    {
        match &self.wait {
            RefreshWait::Fixed(delay) => {
                tokio::time::sleep(*delay).await;
                read().await
            }
            RefreshWait::PollUntilChanged { interval, timeout } => {
                let deadline = Instant::now() + *timeout;
                let mut polls = 0u32;

                loop {
                    tokio::time::sleep(*interval).await;
                    polls += 1;

                    let value = read().await?;
                    if !unchanged(&value) {
                        tracing::debug!(polls, "Refreshed content available");
                        return Ok(value);
                    }
                    if Instant::now() >= deadline {
                        tracing::warn!(
                            polls,
                            timeout_ms = timeout.as_millis() as u64,
                            "Content unchanged after refresh, using latest read"
                        );
                        return Ok(value);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeContentApi};
    use crate::content::{ContentItem, ContentType};

    fn bundle(titles: &[&str]) -> ContentBundle {
        ContentBundle::new(
            titles
                .iter()
                .map(|t| ContentItem::new(ContentType::News, *t, format!("https://n.example/{}", t)))
                .collect(),
        )
    }

    fn controller(api: Arc<FakeContentApi>, wait: RefreshWait) -> SyncController {
        SyncController::new(api, wait)
    }

    #[test]
    fn test_refresh_keywords_defaults() {
        assert_eq!(SyncController::refresh_keywords(&[]), vec!["BTS", "BLACKPINK"]);

        let tracked = vec!["NewJeans".to_string()];
        assert_eq!(SyncController::refresh_keywords(&tracked), tracked);
    }

    #[tokio::test]
    async fn test_load_all_without_refresh() {
        let api = Arc::new(
            FakeContentApi::new()
                .with_content("BTS", bundle(&["a"]))
                .with_content("IVE", bundle(&["b", "c"])),
        );
        let sync = controller(Arc::clone(&api), RefreshWait::default());
        let mut cache = ContentCache::new();
        cache.set("STALE", bundle(&["old"]));
        let mut notices = Notifications::default();

        let count = sync.load_all(&[], false, &mut cache, &mut notices).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(cache.keywords(), vec!["BTS", "IVE"]);
        assert!(cache.get("STALE").is_none());
        assert_eq!(api.calls(), vec![Call::FetchAll]);
        assert!(notices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_force_refresh_uses_defaults_when_untracked() {
        let api = Arc::new(FakeContentApi::new());
        let sync = controller(Arc::clone(&api), RefreshWait::Fixed(Duration::from_millis(2500)));
        let mut cache = ContentCache::new();
        let mut notices = Notifications::default();

        let start = Instant::now();
        sync.load_all(&[], true, &mut cache, &mut notices).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(2500));
        assert_eq!(
            api.calls(),
            vec![
                Call::Refresh(vec!["BTS".to_string(), "BLACKPINK".to_string()]),
                Call::FetchAll
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_until_changed_waits_for_collection() {
        let api = Arc::new(FakeContentApi::new().with_content("BTS", bundle(&["old"])));
        api.stage_collection(vec![("BTS".to_string(), bundle(&["new"]))], 2);

        let sync = controller(
            Arc::clone(&api),
            RefreshWait::PollUntilChanged {
                interval: Duration::from_secs(1),
                timeout: Duration::from_secs(15),
            },
        );
        let mut cache = ContentCache::new();
        cache.set("BTS", bundle(&["old"]));
        let mut notices = Notifications::default();
        let tracked = vec!["BTS".to_string()];

        sync.load_all(&tracked, true, &mut cache, &mut notices).await.unwrap();

        assert_eq!(cache.get("BTS").unwrap().contents[0].title, "new");
        // One baseline read, then three polls
        let reads = api.calls().iter().filter(|c| **c == Call::FetchAll).count();
        assert_eq!(reads, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_with_empty_cache_waits_for_collection() {
        let api = Arc::new(FakeContentApi::new().with_content("BTS", bundle(&["old"])));
        api.stage_collection(vec![("BTS".to_string(), bundle(&["new"]))], 2);

        let sync = controller(Arc::clone(&api), RefreshWait::default());
        let mut cache = ContentCache::new();
        let mut notices = Notifications::default();
        let tracked = vec!["BTS".to_string()];

        let start = Instant::now();
        sync.load_all(&tracked, true, &mut cache, &mut notices).await.unwrap();

        assert_eq!(cache.get("BTS").unwrap().contents[0].title, "new");
        assert!(start.elapsed() >= Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_one_keyword_not_yet_cached() {
        let api = Arc::new(FakeContentApi::new().with_content("IVE", bundle(&["old"])));
        api.stage_collection(vec![("IVE".to_string(), bundle(&["new"]))], 1);

        let sync = controller(Arc::clone(&api), RefreshWait::default());
        let mut cache = ContentCache::new();
        let mut notices = Notifications::default();

        let result = sync
            .load_one(&[], "IVE", true, &mut cache, &mut notices)
            .await
            .unwrap();

        assert_eq!(result.contents[0].title, "new");
        assert_eq!(api.calls()[0], Call::FetchKeyword("IVE".to_string()));
        assert_eq!(
            api.calls()[1],
            Call::Refresh(vec!["BTS".to_string(), "BLACKPINK".to_string(), "IVE".to_string()])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_poll_gives_up_after_timeout() {
        let api = Arc::new(FakeContentApi::new().with_content("BTS", bundle(&["same"])));
        let sync = controller(
            Arc::clone(&api),
            RefreshWait::PollUntilChanged {
                interval: Duration::from_secs(1),
                timeout: Duration::from_secs(5),
            },
        );
        let mut cache = ContentCache::new();
        cache.set("BTS", bundle(&["same"]));
        let mut notices = Notifications::default();

        let tracked = vec!["BTS".to_string()];
        let result = sync
            .load_one(&tracked, "BTS", true, &mut cache, &mut notices)
            .await
            .unwrap();

        assert_eq!(result.contents[0].title, "same");
        let reads = api
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::FetchKeyword(_)))
            .count();
        assert_eq!(reads, 6);
        assert!(notices.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_http_error_leaves_cache_and_notifies_once() {
        let api = Arc::new(FakeContentApi::new());
        api.fail_writes(500);
        let sync = controller(Arc::clone(&api), RefreshWait::default());

        let mut cache = ContentCache::new();
        cache.set("BTS", bundle(&["prior"]));
        let before = cache.get("BTS").cloned();
        let mut notices = Notifications::default();

        let tracked = vec!["BTS".to_string()];
        let err = sync
            .load_one(&tracked, "BTS", true, &mut cache, &mut notices)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(cache.get("BTS").cloned(), before);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.error_count(), 1);
    }

    #[tokio::test]
    async fn test_read_failure_keeps_other_keywords() {
        let api = Arc::new(FakeContentApi::new());
        api.fail_reads(502);
        let sync = controller(Arc::clone(&api), RefreshWait::default());

        let mut cache = ContentCache::new();
        cache.set("IVE", bundle(&["kept"]));
        let mut notices = Notifications::default();

        assert!(sync
            .load_one(&[], "BTS", false, &mut cache, &mut notices)
            .await
            .is_err());
        assert!(sync.load_all(&[], false, &mut cache, &mut notices).await.is_err());

        assert_eq!(cache.keywords(), vec!["IVE"]);
        assert_eq!(notices.error_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_one_refresh_sends_full_tracked_list() {
        let api = Arc::new(FakeContentApi::new().with_content("IVE", bundle(&["x"])));
        let sync = controller(Arc::clone(&api), RefreshWait::Fixed(Duration::from_secs(2)));
        let mut cache = ContentCache::new();
        let mut notices = Notifications::default();

        let tracked = vec!["BTS".to_string(), "IVE".to_string()];
        sync.load_one(&tracked, "IVE", true, &mut cache, &mut notices)
            .await
            .unwrap();

        assert_eq!(api.calls()[0], Call::Refresh(tracked.clone()));
        assert_eq!(cache.keywords(), vec!["IVE"]);
    }

    #[tokio::test]
    async fn test_check_status() {
        let api = Arc::new(FakeContentApi::new());
        let sync = controller(Arc::clone(&api), RefreshWait::default());

        let status = sync.check_status().await.unwrap();
        assert_eq!(status.status, "running");
        assert_eq!(status.api_keys.missing(), vec!["naver_id", "naver_secret"]);
    }
}
