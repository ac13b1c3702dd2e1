use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::ErrorBody;
use crate::models::ChatFeed;
use crate::services::chat_service::job_feed;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(get_channel_messages))
        .route("/jobs/feed", get(get_job_feed))
}

/// Channel history as Slack returns it, with author names attached.
async fn get_channel_messages(
    State(state): State<AppState>,
) -> Result<Json<ChatFeed>, ErrorBody> {
    info!("GET /api/jobs - Fetching channel messages");
    let messages = state.chat.fetch_messages().await.map_err(|e| {
        error!("Error fetching channel messages: {}", e);
        ErrorBody::messages(e)
    })?;
    Ok(Json(ChatFeed::new(messages)))
}

/// Human job posts only, oldest first.
async fn get_job_feed(State(state): State<AppState>) -> Result<Json<ChatFeed>, ErrorBody> {
    info!("GET /api/jobs/feed - Building job feed");
    let messages = state.chat.fetch_messages().await.map_err(|e| {
        error!("Error building job feed: {}", e);
        ErrorBody::messages(e)
    })?;
    Ok(Json(ChatFeed::new(job_feed(messages))))
}
