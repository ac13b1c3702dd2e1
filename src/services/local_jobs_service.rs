use std::sync::Arc;

use tracing::{error, info};

use crate::errors::AppError;
use crate::external::adzuna::{AdzunaJob, AdzunaLocation, LocalJobProvider, LocalSearch};
use crate::models::{Job, JobSource, JobType, LocalJobsPage, LOCAL_SOURCE_LABEL};
use crate::services::html::sanitize_html;
use crate::services::response_cache::{local_jobs_key, ResponseCache};

/// Best-effort city name for an Adzuna location.
///
/// Prefers the last entry of `area`, which Adzuna orders from country down to the
/// most specific place. Without an area breakdown the display name is split on
/// commas and the second-to-last segment is taken, assuming "venue, city, state".
/// That ordering is not guaranteed by the upstream and is not validated here.
pub fn extract_city(location: &AdzunaLocation) -> String {
    if let Some(area) = location.area.last() {
        return area.clone();
    }

    let display = location.display_name.as_deref().unwrap_or_default();
    let parts: Vec<&str> = display.split(',').collect();
    if parts.len() >= 2 {
        parts[parts.len() - 2].trim().to_string()
    } else {
        display.trim().to_string()
    }
}

pub fn normalize_local_job(job: AdzunaJob) -> Job {
    Job {
        location: extract_city(&job.location),
        id: job.id,
        title: job.title,
        company: job.company.and_then(|c| c.display_name),
        salary_min: job.salary_min,
        salary_max: job.salary_max,
        description: sanitize_html(&job.description),
        url: job.redirect_url,
        created: job.created,
        job_type: JobType::Local,
        source: JobSource::Adzuna,
        tags: None,
    }
}

pub struct LocalJobsService {
    provider: Option<Arc<dyn LocalJobProvider>>,
    cache: ResponseCache<LocalJobsPage>,
}

impl LocalJobsService {
    /// `provider` is `None` when the search credentials are not configured.
    pub fn new(
        provider: Option<Arc<dyn LocalJobProvider>>,
        cache: ResponseCache<LocalJobsPage>,
    ) -> Self {
        Self { provider, cache }
    }

    pub async fn fetch_page(
        &self,
        page: u32,
        limit: u32,
        distance: u32,
    ) -> Result<LocalJobsPage, AppError> {
        let key = local_jobs_key(page, distance);
        if let Some(cached) = self.cache.get(&key) {
            info!("Serving local jobs from cache ({})", key);
            return Ok(cached);
        }

        let provider = self.provider.as_ref().ok_or_else(|| {
            AppError::Configuration("Adzuna API credentials not configured".to_string())
        })?;

        let response = provider
            .search(LocalSearch {
                page,
                limit,
                distance,
            })
            .await
            .map_err(|e| {
                error!("Local job search failed: {}", e);
                AppError::from(e)
            })?;

        let total = response.count;
        let jobs: Vec<Job> = response.results.into_iter().map(normalize_local_job).collect();
        info!("Fetched {} local jobs (page {}, {} total)", jobs.len(), page, total);

        let result = LocalJobsPage {
            jobs,
            total,
            page,
            has_more: u64::from(page) * u64::from(limit) < total,
            source: LOCAL_SOURCE_LABEL.to_string(),
        };

        self.cache.put(key, result.clone());
        Ok(result)
    }
}
