//! Health check DTOs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    /// Number of flats in the store, absent when the store could not answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flats: Option<usize>,
}
