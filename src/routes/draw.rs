//! Routes for direct draws and win-status resets.

use axum::{Json, Router, extract::State, routing::post};
use validator::Validate;

use crate::{
    dto::draw::{DrawRequest, DrawResponse, ResetRequest, ResetResponse},
    error::AppError,
    services::draw_service,
    state::SharedState,
};

#[utoipa::path(
    post,
    path = "/draw",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "Winners drawn", body = DrawResponse),
        (status = 400, description = "No eligible numbers"),
        (status = 404, description = "Prize not found")
    )
)]
/// Draw winners immediately, bypassing the display session.
pub async fn draw(
    State(state): State<SharedState>,
    Json(request): Json<DrawRequest>,
) -> Result<Json<DrawResponse>, AppError> {
    request.validate()?;
    let response = draw_service::draw(&state, &request.prize_id, request.count).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/reset",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Win status reset", body = ResetResponse),
        (status = 400, description = "Rejected while rolling"),
        (status = 404, description = "Prize not found")
    )
)]
/// Reset win status for one prize or for everything.
pub async fn reset(
    State(state): State<SharedState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, AppError> {
    let response = draw_service::reset(&state, request.prize_id).await?;
    Ok(Json(response))
}

/// Configure the draw and reset routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/draw", post(draw))
        .route("/reset", post(reset))
}
