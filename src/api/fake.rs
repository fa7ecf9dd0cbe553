//! In-memory [`ContentApi`] for tests
//!
//! Simulates the server's background collection: after a refresh, content
//! staged with [`FakeContentApi::stage_collection`] becomes visible once
//! `reads_until_collected` further reads have happened.

use super::client::ContentApi;
use super::dto::{ApiKeyStatus, RefreshResponse, ServiceStatus};
use super::error::{ApiError, ApiResult};
use crate::content::ContentBundle;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchAll,
    FetchKeyword(String),
    Refresh(Vec<String>),
    PushKeywords(Vec<String>),
    Status,
}

#[derive(Default)]
struct State {
    content: Vec<(String, ContentBundle)>,
    staged: Option<Vec<(String, ContentBundle)>>,
    collecting: bool,
    reads_until_collected: usize,
    fail_reads: Option<u16>,
    fail_writes: Option<u16>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeContentApi {
    state: Mutex<State>,
}

impl FakeContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content the server currently serves
    pub fn with_content(self, keyword: &str, bundle: ContentBundle) -> Self {
        self.state
            .lock()
            .unwrap()
            .content
            .push((keyword.to_string(), bundle));
        self
    }

    /// Content that replaces everything once a refresh has been collected
    pub fn stage_collection(&self, content: Vec<(String, ContentBundle)>, reads_until_collected: usize) {
        let mut state = self.state.lock().unwrap();
        state.staged = Some(content);
        state.reads_until_collected = reads_until_collected;
    }

    /// Make every read fail with this HTTP status
    pub fn fail_reads(&self, status: u16) {
        self.state.lock().unwrap().fail_reads = Some(status);
    }

    /// Make refresh and keyword pushes fail with this HTTP status
    pub fn fail_writes(&self, status: u16) {
        self.state.lock().unwrap().fail_writes = Some(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    /// Count a read and apply staged content when collection finishes
    fn read(&self) -> ApiResult<Vec<(String, ContentBundle)>> {
        let mut state = self.state.lock().unwrap();
        if let Some(status) = state.fail_reads {
            return Err(http_error(status));
        }

        if state.collecting {
            if state.reads_until_collected == 0 {
                if let Some(staged) = state.staged.take() {
                    state.content = staged;
                }
                state.collecting = false;
            } else {
                state.reads_until_collected -= 1;
            }
        }

        Ok(state.content.clone())
    }

    fn write(&self) -> ApiResult<()> {
        match self.state.lock().unwrap().fail_writes {
            Some(status) => Err(http_error(status)),
            None => Ok(()),
        }
    }
}

fn http_error(status: u16) -> ApiError {
    ApiError::Http {
        status,
        message: "simulated failure".to_string(),
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn fetch_all(&self) -> ApiResult<Vec<(String, ContentBundle)>> {
        self.record(Call::FetchAll);
        self.read()
    }

    async fn fetch_keyword(&self, keyword: &str) -> ApiResult<ContentBundle> {
        self.record(Call::FetchKeyword(keyword.to_string()));
        let content = self.read()?;
        Ok(content
            .into_iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, bundle)| bundle)
            .unwrap_or_default())
    }

    async fn request_refresh(&self, keywords: &[String]) -> ApiResult<RefreshResponse> {
        self.record(Call::Refresh(keywords.to_vec()));
        self.write()?;

        let mut state = self.state.lock().unwrap();
        if state.staged.is_some() {
            state.collecting = true;
        }
        Ok(RefreshResponse {
            status: Some("collecting".to_string()),
            ..Default::default()
        })
    }

    async fn push_keywords(&self, keywords: &[String]) -> ApiResult<()> {
        self.record(Call::PushKeywords(keywords.to_vec()));
        self.write()
    }

    async fn status(&self) -> ApiResult<ServiceStatus> {
        self.record(Call::Status);
        Ok(ServiceStatus {
            status: "running".to_string(),
            api_keys: ApiKeyStatus {
                youtube: "configured".to_string(),
                naver_id: "missing".to_string(),
                naver_secret: "missing".to_string(),
            },
            ..Default::default()
        })
    }
}
