use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::external::{lenient_f64, string_or_number, UpstreamError};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOkJob {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub salary_max: Option<f64>,
}

/// A decoded listing plus the number of entries the upstream actually sent.
#[derive(Debug, Clone, Default)]
pub struct RemoteListing {
    pub jobs: Vec<RemoteOkJob>,
    /// Every entry in the feed, including the legal notice and anything undecodable.
    pub raw_count: usize,
}

#[async_trait]
pub trait RemoteJobProvider: Send + Sync {
    /// The complete listing. The upstream has no server-side paging or categories.
    async fn fetch_listing(&self) -> Result<RemoteListing, UpstreamError>;
}

pub struct RemoteOkClient {
    client: reqwest::Client,
    url: String,
}

impl RemoteOkClient {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl RemoteJobProvider for RemoteOkClient {
    async fn fetch_listing(&self) -> Result<RemoteListing, UpstreamError> {
        let resp = self.client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            error!("RemoteOK API returned {}", status);
            return Err(UpstreamError::Status(format!(
                "RemoteOK API error: {}",
                status.as_u16()
            )));
        }

        let entries: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(decode_listing(entries))
    }
}

/// Decode every entry that looks like a job. The feed leads with a legal notice
/// object that has no id; it and any other malformed entry are skipped.
pub fn decode_listing(entries: Vec<serde_json::Value>) -> RemoteListing {
    let raw_count = entries.len();
    let jobs: Vec<RemoteOkJob> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if jobs.len() != raw_count {
        debug!("Skipped {} non-job entries in RemoteOK listing", raw_count - jobs.len());
    }
    RemoteListing { jobs, raw_count }
}
