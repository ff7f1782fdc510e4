//! Body for the health probe.

use serde::Serialize;
use utoipa::ToSchema;

/// Health probe payload: storage status plus connected display count.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the data directory is not writable.
    pub status: String,
    /// Display sockets currently connected.
    pub displays: usize,
}

impl HealthResponse {
    /// Storage is writable.
    pub fn ok(displays: usize) -> Self {
        Self {
            status: "ok".to_string(),
            displays,
        }
    }

    /// The data directory could not be created or written.
    pub fn degraded(displays: usize) -> Self {
        Self {
            status: "degraded".to_string(),
            displays,
        }
    }
}
