use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::external::{lenient_f64, string_or_number, UpstreamError};

/// One page of a local job search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSearch {
    pub page: u32,
    pub limit: u32,
    pub distance: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaSearchResponse {
    #[serde(default)]
    pub results: Vec<AdzunaJob>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdzunaJob {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: Option<AdzunaCompany>,
    #[serde(default)]
    pub location: AdzunaLocation,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub salary_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub redirect_url: String,
    #[serde(default)]
    pub created: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdzunaCompany {
    pub display_name: Option<String>,
}

/// Location as Adzuna nests it: `area` runs from country down to the most specific place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdzunaLocation {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub area: Vec<String>,
}

#[async_trait]
pub trait LocalJobProvider: Send + Sync {
    async fn search(&self, search: LocalSearch) -> Result<AdzunaSearchResponse, UpstreamError>;
}

pub struct AdzunaClient {
    client: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
    location: String,
    keyword: String,
}

impl AdzunaClient {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        app_id: String,
        app_key: String,
        location: String,
        keyword: String,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            app_id,
            app_key,
            location,
            keyword,
        }
    }
}

#[async_trait]
impl LocalJobProvider for AdzunaClient {
    async fn search(&self, search: LocalSearch) -> Result<AdzunaSearchResponse, UpstreamError> {
        let url = format!("{}/jobs/us/search/{}", self.base_url, search.page);
        debug!(
            "Adzuna search page={} limit={} distance={}",
            search.page, search.limit, search.distance
        );

        let distance = search.distance.to_string();
        let per_page = search.limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("where", self.location.as_str()),
                ("distance", distance.as_str()),
                ("what", self.keyword.as_str()),
                ("results_per_page", per_page.as_str()),
                ("sort_by", "date"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            error!("Adzuna API returned {}", status);
            return Err(UpstreamError::Status(format!(
                "Adzuna API error: {}",
                status.as_u16()
            )));
        }

        let body: AdzunaSearchResponse = resp
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        Ok(body)
    }
}
