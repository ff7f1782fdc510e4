//! Routes for the rounds resource.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dto::{
        catalog::{RoundCreateRequest, RoundResponse, RoundUpdateRequest, RoundsResponse},
        common::OkResponse,
    },
    error::AppError,
    services::catalog_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/rounds",
    responses((status = 200, description = "All rounds", body = RoundsResponse))
)]
/// List every round.
pub async fn list_rounds(State(state): State<SharedState>) -> Json<RoundsResponse> {
    Json(catalog_service::list_rounds(&state).await)
}

#[utoipa::path(
    post,
    path = "/rounds",
    request_body = RoundCreateRequest,
    responses(
        (status = 200, description = "Round created", body = RoundResponse),
        (status = 400, description = "Missing name")
    )
)]
/// Create a round.
pub async fn create_round(
    State(state): State<SharedState>,
    Json(request): Json<RoundCreateRequest>,
) -> Result<Json<RoundResponse>, AppError> {
    request.validate()?;
    let response = catalog_service::create_round(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/rounds/{id}",
    params(("id" = u32, Path, description = "Round identifier")),
    request_body = RoundUpdateRequest,
    responses(
        (status = 200, description = "Round updated", body = RoundResponse),
        (status = 404, description = "Round not found")
    )
)]
/// Rename a round or switch its pool type.
pub async fn update_round(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
    Json(request): Json<RoundUpdateRequest>,
) -> Result<Json<RoundResponse>, AppError> {
    request.validate()?;
    let response = catalog_service::update_round(&state, id, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/rounds/{id}",
    params(("id" = u32, Path, description = "Round identifier")),
    responses(
        (status = 200, description = "Round deleted", body = OkResponse),
        (status = 404, description = "Round not found")
    )
)]
/// Delete a round and every prize it contains.
pub async fn delete_round(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<OkResponse>, AppError> {
    let response = catalog_service::delete_round(&state, id).await?;
    Ok(Json(response))
}

/// Configure the rounds routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/rounds", get(list_rounds).post(create_round))
        .route("/rounds/{id}", put(update_round).delete(delete_round))
}
