//! Routes for the draw control surface.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        common::OkResponse,
        control::{
            DisplayStatePatch, QrcodeStatusResponse, QrcodeToggleRequest, QrcodeToggleResponse,
            StartRollingRequest,
        },
        draw::DrawResponse,
        snapshot::FullState,
    },
    error::AppError,
    services::control_service,
    state::SharedState,
};

#[utoipa::path(
    post,
    path = "/control/start",
    request_body = StartRollingRequest,
    responses(
        (status = 200, description = "Rolling started", body = OkResponse),
        (status = 400, description = "Already rolling or no eligible numbers")
    )
)]
/// Start the rolling animation for a prize.
pub async fn start_rolling(
    State(state): State<SharedState>,
    Json(request): Json<StartRollingRequest>,
) -> Result<Json<OkResponse>, AppError> {
    request.validate()?;
    let response = control_service::start_rolling(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/control/stop",
    responses(
        (status = 200, description = "Winners drawn", body = DrawResponse),
        (status = 400, description = "Not rolling or no eligible numbers")
    )
)]
/// Stop the roll and draw the winners.
pub async fn stop_rolling(
    State(state): State<SharedState>,
) -> Result<Json<DrawResponse>, AppError> {
    let response = control_service::stop_rolling(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/control/state",
    responses((status = 200, description = "Full display snapshot", body = FullState))
)]
/// Return the full display snapshot.
pub async fn get_state(State(state): State<SharedState>) -> Result<Json<FullState>, AppError> {
    let snapshot = control_service::get_full_state(&state).await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    post,
    path = "/control/state",
    request_body = DisplayStatePatch,
    responses(
        (status = 200, description = "Updated snapshot", body = FullState),
        (status = 400, description = "Rejected while rolling")
    )
)]
/// Apply a partial session update and broadcast the result.
pub async fn patch_state(
    State(state): State<SharedState>,
    Json(patch): Json<DisplayStatePatch>,
) -> Result<Json<FullState>, AppError> {
    let snapshot = control_service::patch_state(&state, patch).await?;
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/control/qrcode",
    responses((status = 200, description = "QR code overlay status", body = QrcodeStatusResponse))
)]
/// Return the QR code overlay status.
pub async fn qrcode_status(State(state): State<SharedState>) -> Json<QrcodeStatusResponse> {
    Json(control_service::qrcode_status(&state).await)
}

#[utoipa::path(
    post,
    path = "/control/qrcode",
    request_body = QrcodeToggleRequest,
    responses((status = 200, description = "QR code overlay toggled", body = QrcodeToggleResponse))
)]
/// Toggle the QR code overlay.
pub async fn toggle_qrcode(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(request): Json<QrcodeToggleRequest>,
) -> Json<QrcodeToggleResponse> {
    Json(control_service::toggle_qrcode(&state, &headers, request).await)
}

/// Configure the control routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/control/start", post(start_rolling))
        .route("/control/stop", post(stop_rolling))
        .route("/control/state", get(get_state).post(patch_state))
        .route("/control/qrcode", get(qrcode_status).post(toggle_qrcode))
}
