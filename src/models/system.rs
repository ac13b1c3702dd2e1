use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
}

/// Served at the API root so a browser hitting `/api` sees what exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiIndex {
    pub status: String,
    pub message: String,
    pub endpoints: Vec<String>,
}
