use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobSource {
    Adzuna,
    RemoteOk,
}

/// A job posting normalized from any upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    /// Plain text, markup already stripped.
    pub description: String,
    pub url: String,
    pub created: String,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub source: JobSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

pub const LOCAL_SOURCE_LABEL: &str = "local_reno";
pub const REMOTE_SOURCE_LABEL: &str = "remote";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalJobsPage {
    pub jobs: Vec<Job>,
    /// Match count reported by the upstream search.
    pub total: u64,
    pub page: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteJobsPage {
    pub jobs: Vec<Job>,
    /// Size of the keyword-filtered set the page was cut from.
    pub total: u64,
    /// Entries in the raw upstream feed, non-job entries included.
    pub upstream_total: u64,
    pub page: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedJobsPage {
    pub jobs: Vec<Job>,
    pub page: u32,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub local_count: usize,
    pub remote_count: usize,
    pub total_loaded: usize,
}
