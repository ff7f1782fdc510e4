//! Routes for the configuration resource.

use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::config::{ConfigResponse, ConfigUpdateRequest},
    error::AppError,
    services::config_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/config",
    responses((status = 200, description = "Stored configuration", body = ConfigResponse))
)]
/// Return the stored configuration.
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    Json(config_service::get_config(&state).await)
}

#[utoipa::path(
    put,
    path = "/config",
    request_body = ConfigUpdateRequest,
    responses((status = 200, description = "Configuration updated", body = ConfigResponse))
)]
/// Merge a partial update into the stored configuration.
pub async fn update_config(
    State(state): State<SharedState>,
    Json(request): Json<ConfigUpdateRequest>,
) -> Result<Json<ConfigResponse>, AppError> {
    let response = config_service::update_config(&state, request).await?;
    Ok(Json(response))
}

/// Configure the configuration routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/config", get(get_config).put(update_config))
}
