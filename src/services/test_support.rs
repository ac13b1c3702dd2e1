//! In-memory upstream stubs shared by service and route tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::external::adzuna::{
    AdzunaCompany, AdzunaJob, AdzunaLocation, AdzunaSearchResponse, LocalJobProvider, LocalSearch,
};
use crate::external::remoteok::{RemoteJobProvider, RemoteListing, RemoteOkJob};
use crate::external::slack::{ChatProvider, SlackMessage, SlackUser, SlackUserProfile};
use crate::external::UpstreamError;

pub fn adzuna_job(id: &str, title: &str) -> AdzunaJob {
    AdzunaJob {
        id: id.to_string(),
        title: title.to_string(),
        company: Some(AdzunaCompany {
            display_name: Some("Acme".to_string()),
        }),
        location: AdzunaLocation {
            display_name: Some("Midtown, Reno, NV".to_string()),
            area: Vec::new(),
        },
        salary_min: Some(90000.0),
        salary_max: Some(120000.0),
        description: "<p>Build services in Rust</p>".to_string(),
        redirect_url: format!("https://www.adzuna.com/details/{}", id),
        created: "2026-10-01T12:00:00Z".to_string(),
    }
}

pub fn remote_job(id: &str, title: &str) -> RemoteOkJob {
    RemoteOkJob {
        id: id.to_string(),
        position: Some(title.to_string()),
        company: Some("Remote Co".to_string()),
        description: Some("<p>Work from <b>anywhere</b> &amp; ship</p>".to_string()),
        url: format!("https://remoteok.com/remote-jobs/{}", id),
        date: "2026-10-02T09:00:00+00:00".to_string(),
        tags: vec!["dev".to_string()],
        salary_min: Some(0.0),
        salary_max: Some(150000.0),
    }
}

pub struct StubLocalProvider {
    jobs: Vec<AdzunaJob>,
    count: u64,
    error: Option<String>,
    calls: AtomicUsize,
    searches: Mutex<Vec<LocalSearch>>,
}

impl StubLocalProvider {
    pub fn with_jobs(jobs: Vec<AdzunaJob>, count: u64) -> Self {
        Self {
            jobs,
            count,
            error: None,
            calls: AtomicUsize::new(0),
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::with_jobs(Vec::new(), 0)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn searches(&self) -> Vec<LocalSearch> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl LocalJobProvider for StubLocalProvider {
    async fn search(&self, search: LocalSearch) -> Result<AdzunaSearchResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.searches.lock().unwrap().push(search);
        if let Some(message) = &self.error {
            return Err(UpstreamError::Status(message.clone()));
        }
        let results = self.jobs.iter().take(search.limit as usize).cloned().collect();
        Ok(AdzunaSearchResponse {
            results,
            count: self.count,
        })
    }
}

pub struct StubRemoteProvider {
    listing: Vec<RemoteOkJob>,
    /// Feed entries that never decode into a job, such as the legal notice.
    non_job_entries: usize,
    error: Option<String>,
    calls: AtomicUsize,
}

impl StubRemoteProvider {
    pub fn with_listing(listing: Vec<RemoteOkJob>) -> Self {
        Self {
            listing,
            non_job_entries: 0,
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_non_job_entries(mut self, count: usize) -> Self {
        self.non_job_entries = count;
        self
    }

    pub fn with_titles(titles: &[&str]) -> Self {
        Self::with_listing(
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| remote_job(&(i + 1).to_string(), title))
                .collect(),
        )
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::with_listing(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteJobProvider for StubRemoteProvider {
    async fn fetch_listing(&self) -> Result<RemoteListing, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(UpstreamError::Status(message.clone())),
            None => Ok(RemoteListing {
                jobs: self.listing.clone(),
                raw_count: self.listing.len() + self.non_job_entries,
            }),
        }
    }
}

pub fn slack_user(id: &str, display_name: &str) -> SlackUser {
    SlackUser {
        id: id.to_string(),
        name: Some(format!("{}-handle", id.to_lowercase())),
        profile: SlackUserProfile {
            display_name: Some(display_name.to_string()),
            ..SlackUserProfile::default()
        },
    }
}

pub fn slack_message(ts: &str, text: &str, user: Option<&str>) -> SlackMessage {
    SlackMessage {
        ts: ts.to_string(),
        text: text.to_string(),
        user: user.map(str::to_string),
        ..SlackMessage::default()
    }
}

#[derive(Default)]
pub struct StubChatProvider {
    pub messages: Vec<SlackMessage>,
    pub history_error: Option<String>,
    /// Users `users.info` knows about.
    pub directory: HashMap<String, SlackUser>,
    /// Ids for which `users.info` errors instead of answering.
    pub failing_lookups: Vec<String>,
    pub members: Vec<SlackUser>,
    pub members_error: Option<String>,
    pub info_calls: AtomicUsize,
    pub member_calls: AtomicUsize,
}

impl StubChatProvider {
    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn member_calls(&self) -> usize {
        self.member_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatProvider for StubChatProvider {
    async fn conversation_history(
        &self,
        _channel: &str,
        limit: u32,
    ) -> Result<Vec<SlackMessage>, UpstreamError> {
        if let Some(message) = &self.history_error {
            return Err(UpstreamError::Api(message.clone()));
        }
        Ok(self.messages.iter().take(limit as usize).cloned().collect())
    }

    async fn user_info(&self, user_id: &str) -> Result<Option<SlackUser>, UpstreamError> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_lookups.iter().any(|id| id == user_id) {
            return Err(UpstreamError::Api("missing_scope".to_string()));
        }
        Ok(self.directory.get(user_id).cloned())
    }

    async fn list_members(&self) -> Result<Vec<SlackUser>, UpstreamError> {
        self.member_calls.fetch_add(1, Ordering::SeqCst);
        match &self.members_error {
            Some(message) => Err(UpstreamError::Api(message.clone())),
            None => Ok(self.members.clone()),
        }
    }
}
