pub mod adzuna;
pub mod remoteok;
pub mod slack;

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status; the message is surfaced to the client as-is.
    #[error("{0}")]
    Status(String),

    /// The upstream answered but reported a failure in its payload.
    #[error("{0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            UpstreamError::Parse(value.to_string())
        } else {
            UpstreamError::Network(value.to_string())
        }
    }
}

/// Shared HTTP client for every upstream. Each request is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("devreno-backend/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| UpstreamError::Network(e.to_string()))
}

/// Upstream ids arrive as either JSON strings or numbers.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
        Id::Float(n) => n.to_string(),
    })
}

/// Numeric fields that some upstreams send as strings ("85000") or leave empty.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Num {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<Num>::deserialize(deserializer)? {
        Some(Num::Number(n)) => Some(n),
        Some(Num::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}
