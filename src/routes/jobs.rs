use axum::extract::{RawQuery, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{CombinedJobsPage, LocalJobsPage, RemoteJobsPage};
use crate::services::remote_jobs_service::DEFAULT_PAGE_SIZE;
use crate::state::AppState;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = DEFAULT_PAGE_SIZE;
pub const DEFAULT_DISTANCE: u32 = 75;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/local-jobs", get(get_local_jobs))
        .route("/remote-jobs", get(get_remote_jobs))
        .route("/all-jobs", get(get_all_jobs))
}

/// Raw query values; parsed leniently so a malformed value falls back to its
/// default instead of rejecting the request.
#[derive(Debug, Default)]
pub struct JobsQuery {
    page: Option<String>,
    limit: Option<String>,
    distance: Option<String>,
}

fn positive_or(value: Option<&str>, default: u32) -> u32 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

impl JobsQuery {
    /// Read `page`, `limit` and `distance` from a raw query string. A repeated
    /// key keeps its first value; unknown keys are ignored.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "distance" => &mut query.distance,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }

    pub fn page(&self) -> u32 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> u32 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    /// Search radius in miles. Absent means the default radius; a value that is
    /// present but unusable (not a number, or negative) means zero, which the
    /// combined endpoint treats as "remote only".
    pub fn distance(&self) -> u32 {
        match self.distance.as_deref() {
            None => DEFAULT_DISTANCE,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(|n| u32::try_from(n.max(0)).unwrap_or(u32::MAX))
                .unwrap_or(0),
        }
    }
}

async fn get_local_jobs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<LocalJobsPage>, AppError> {
    let query = JobsQuery::from_raw(raw.as_deref());
    let (page, limit, distance) = (query.page(), query.limit(), query.distance());
    info!("GET /api/local-jobs page={} limit={} distance={}", page, limit, distance);

    let result = state
        .local_jobs
        .fetch_page(page, limit, distance)
        .await
        .map_err(|e| {
            error!("Error fetching local jobs: {}", e);
            e
        })?;
    Ok(Json(result))
}

async fn get_remote_jobs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<RemoteJobsPage>, AppError> {
    let query = JobsQuery::from_raw(raw.as_deref());
    let (page, limit) = (query.page(), query.limit());
    info!("GET /api/remote-jobs page={} limit={}", page, limit);

    let result = state.remote_jobs.fetch_page(page, limit).await.map_err(|e| {
        error!("Error fetching remote jobs: {}", e);
        e
    })?;
    Ok(Json(result))
}

async fn get_all_jobs(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<CombinedJobsPage>, AppError> {
    let query = JobsQuery::from_raw(raw.as_deref());
    let (page, limit, distance) = (query.page(), query.limit(), query.distance());
    info!("GET /api/all-jobs page={} limit={} distance={}", page, limit, distance);

    let result = state
        .aggregator
        .combined(page, limit, distance)
        .await
        .map_err(|e| {
            error!("Error fetching combined jobs: {}", e);
            e
        })?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, distance: Option<&str>) -> JobsQuery {
        JobsQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            distance: distance.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_when_absent() {
        let q = JobsQuery::default();
        assert_eq!((q.page(), q.limit(), q.distance()), (1, 20, 75));
    }

    #[test]
    fn test_invalid_page_and_limit_fall_back() {
        let q = query(Some("abc"), Some("0"), None);
        assert_eq!((q.page(), q.limit()), (1, 20));
        let q = query(Some("-3"), Some(" 15 "), None);
        assert_eq!((q.page(), q.limit()), (1, 15));
    }

    #[test]
    fn test_from_raw_keeps_first_of_repeated_keys() {
        let q = JobsQuery::from_raw(Some("page=2&page=5&limit=10&distance=30&distance=x&sort=new"));
        assert_eq!((q.page(), q.limit(), q.distance()), (2, 10, 30));
    }

    #[test]
    fn test_from_raw_without_query() {
        let q = JobsQuery::from_raw(None);
        assert_eq!((q.page(), q.limit(), q.distance()), (1, 20, 75));
        let q = JobsQuery::from_raw(Some("limit=%2015&distance="));
        assert_eq!((q.limit(), q.distance()), (15, 0));
    }

    #[test]
    fn test_distance_parsing() {
        assert_eq!(query(None, None, Some("25")).distance(), 25);
        assert_eq!(query(None, None, Some("0")).distance(), 0);
        assert_eq!(query(None, None, Some("-10")).distance(), 0);
        assert_eq!(query(None, None, Some("far")).distance(), 0);
    }
}
