use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the data directory and report it together with the number of
/// connected displays.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let displays = state.connected_displays();
    match state.store().health_check() {
        Ok(()) => HealthResponse::ok(displays),
        Err(err) => {
            warn!(error = %err, "data directory health check failed");
            HealthResponse::degraded(displays)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dao::FileStore, state::AppState};

    #[tokio::test]
    async fn fresh_state_reports_ok_with_no_displays() {
        let dir = std::env::temp_dir().join(format!("lucky-draw-test-{}", uuid::Uuid::new_v4()));
        let state = AppState::new(FileStore::new(dir));

        let response = health_status(&state).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.displays, 0);

        let _ = std::fs::remove_dir_all(state.store().data_dir());
    }
}
