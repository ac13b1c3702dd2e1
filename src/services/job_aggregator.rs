use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::models::CombinedJobsPage;
use crate::services::local_jobs_service::LocalJobsService;
use crate::services::remote_jobs_service::RemoteJobsService;

/// How a combined page is split between the two backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitBudget {
    pub page: u32,
    pub local_limit: u32,
    pub remote_limit: u32,
}

/// Both halves ask for page ceil(page / 2); local gets the larger half of the limit.
/// With a limit of 1 the remote half is 0, which the remote service reads as its
/// default page size.
pub fn split_budget(page: u32, limit: u32) -> SplitBudget {
    SplitBudget {
        page: page.div_ceil(2),
        local_limit: limit.div_ceil(2),
        remote_limit: limit / 2,
    }
}

pub struct JobAggregator {
    local: Arc<LocalJobsService>,
    remote: Arc<RemoteJobsService>,
}

impl JobAggregator {
    pub fn new(local: Arc<LocalJobsService>, remote: Arc<RemoteJobsService>) -> Self {
        Self { local, remote }
    }

    /// Local and remote jobs in one page, local entries first.
    ///
    /// A `distance` of zero means remote only. Otherwise both halves are fetched
    /// concurrently and a failure in either fails the whole page. `has_more` is
    /// true when either half reports more, even though the halves paginate
    /// independently.
    pub async fn combined(
        &self,
        page: u32,
        limit: u32,
        distance: u32,
    ) -> Result<CombinedJobsPage, AppError> {
        let (local_jobs, local_more, remote_jobs, remote_more) = if distance > 0 {
            let budget = split_budget(page, limit);
            let (local, remote) = tokio::try_join!(
                self.local.fetch_page(budget.page, budget.local_limit, distance),
                self.remote.fetch_page(budget.page, budget.remote_limit),
            )?;
            (local.jobs, local.has_more, remote.jobs, remote.has_more)
        } else {
            let remote = self.remote.fetch_page(page, limit).await?;
            (Vec::new(), false, remote.jobs, remote.has_more)
        };

        let local_count = local_jobs.len();
        let remote_count = remote_jobs.len();
        let mut jobs = local_jobs;
        jobs.extend(remote_jobs);

        info!(
            "Combined page {}: {} local + {} remote jobs",
            page, local_count, remote_count
        );

        Ok(CombinedJobsPage {
            jobs,
            page,
            has_more: local_more || remote_more,
            local_count,
            remote_count,
            total_loaded: local_count + remote_count,
        })
    }
}
