use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::external::UpstreamError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// Render this error with `collection` as the name of the empty result array.
    pub fn into_body(self, collection: &'static str) -> ErrorBody {
        ErrorBody {
            error: self,
            collection,
        }
    }
}

/// Error response carrying the key of the empty collection the front-end expects.
#[derive(Debug)]
pub struct ErrorBody {
    error: AppError,
    collection: &'static str,
}

impl ErrorBody {
    pub fn messages(error: AppError) -> Self {
        error.into_body("messages")
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        // Every failure is a 500 so the front-end can render one error state.
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let mut body = serde_json::Map::new();
        body.insert("error".to_string(), json!(self.error.to_string()));
        body.insert(self.collection.to_string(), json!([]));
        (status, Json(serde_json::Value::Object(body))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_body("jobs").into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(value: UpstreamError) -> Self {
        AppError::Upstream(value.to_string())
    }
}
