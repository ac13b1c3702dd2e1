use std::sync::Arc;

use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::external::remoteok::{RemoteJobProvider, RemoteOkJob};
use crate::models::{Job, JobSource, JobType, RemoteJobsPage, REMOTE_SOURCE_LABEL};
use crate::services::html::sanitize_html;
use crate::services::response_cache::{remote_jobs_key, ResponseCache};

/// Page size used when a caller asks for zero jobs per page.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// A remote listing is kept when its title contains any of these, ignoring case.
pub const ROLE_KEYWORDS: [&str; 10] = [
    "software",
    "engineer",
    "developer",
    "frontend",
    "backend",
    "full stack",
    "react",
    "javascript",
    "python",
    "node",
];

pub fn is_software_role(title: &str) -> bool {
    let title = title.to_lowercase();
    ROLE_KEYWORDS.iter().any(|keyword| title.contains(keyword))
}

pub fn normalize_remote_job(job: RemoteOkJob) -> Job {
    Job {
        id: job.id,
        title: job.position.unwrap_or_default(),
        company: job.company,
        location: "Remote".to_string(),
        // RemoteOK sends 0 for an unknown salary.
        salary_min: job.salary_min.filter(|v| *v != 0.0),
        salary_max: job.salary_max.filter(|v| *v != 0.0),
        description: sanitize_html(job.description.as_deref().unwrap_or_default()),
        url: job.url,
        created: job.date,
        job_type: JobType::Remote,
        source: JobSource::RemoteOk,
        tags: Some(job.tags),
    }
}

/// One-based offset/limit slice.
fn page_slice<T>(items: Vec<T>, page: u32, limit: u32) -> Vec<T> {
    let offset = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    items.into_iter().skip(offset).take(limit as usize).collect()
}

pub struct RemoteJobsService {
    provider: Arc<dyn RemoteJobProvider>,
    cache: ResponseCache<RemoteJobsPage>,
}

impl RemoteJobsService {
    pub fn new(provider: Arc<dyn RemoteJobProvider>, cache: ResponseCache<RemoteJobsPage>) -> Self {
        Self { provider, cache }
    }

    /// Filter the full listing to software roles, then cut page `page` of size `limit`.
    ///
    /// `total` and `has_more` describe the filtered set; the raw listing size is
    /// reported separately as `upstream_total`. A `limit` of zero means
    /// `DEFAULT_PAGE_SIZE`, so an empty page is never cached under the shared key.
    pub async fn fetch_page(&self, page: u32, limit: u32) -> Result<RemoteJobsPage, AppError> {
        let limit = if limit == 0 { DEFAULT_PAGE_SIZE } else { limit };
        let key = remote_jobs_key(page);
        if let Some(cached) = self.cache.get(&key) {
            info!("Serving remote jobs from cache ({})", key);
            return Ok(cached);
        }

        let listing = self.provider.fetch_listing().await.map_err(|e| {
            error!("Remote job listing failed: {}", e);
            AppError::from(e)
        })?;

        let upstream_total = listing.raw_count as u64;
        let matching: Vec<RemoteOkJob> = listing
            .jobs
            .into_iter()
            .filter(|job| job.position.as_deref().is_some_and(is_software_role))
            .collect();
        let total = matching.len() as u64;
        debug!("{} of {} remote listings match role keywords", total, upstream_total);

        let jobs: Vec<Job> = page_slice(matching, page, limit)
            .into_iter()
            .map(normalize_remote_job)
            .collect();
        info!("Fetched {} remote jobs (page {}, {} matching)", jobs.len(), page, total);

        let result = RemoteJobsPage {
            jobs,
            total,
            upstream_total,
            page,
            has_more: u64::from(page) * u64::from(limit) < total,
            source: REMOTE_SOURCE_LABEL.to_string(),
        };

        self.cache.put(key, result.clone());
        Ok(result)
    }
}
