//! Routes for the prizes resource.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dto::{
        catalog::{
            PrizeCreateRequest, PrizeListQuery, PrizeResponse, PrizeUpdateRequest, PrizesResponse,
        },
        common::OkResponse,
    },
    error::AppError,
    services::catalog_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/prizes",
    params(("roundId" = Option<u32>, Query, description = "Restrict to one round")),
    responses(
        (status = 200, description = "Prize listing", body = PrizesResponse),
        (status = 404, description = "Round not found")
    )
)]
/// List prizes, optionally scoped to one round.
pub async fn list_prizes(
    State(state): State<SharedState>,
    Query(query): Query<PrizeListQuery>,
) -> Result<Json<PrizesResponse>, AppError> {
    let response = catalog_service::list_prizes(&state, query.round_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/prizes",
    request_body = PrizeCreateRequest,
    responses(
        (status = 200, description = "Prize created", body = PrizeResponse),
        (status = 400, description = "Missing required fields"),
        (status = 404, description = "Round not found")
    )
)]
/// Create a prize inside a round.
pub async fn create_prize(
    State(state): State<SharedState>,
    Json(request): Json<PrizeCreateRequest>,
) -> Result<Json<PrizeResponse>, AppError> {
    request.validate()?;
    let response = catalog_service::create_prize(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/prizes/{id}",
    params(("id" = String, Path, description = "Prize identifier")),
    request_body = PrizeUpdateRequest,
    responses(
        (status = 200, description = "Prize updated", body = PrizeResponse),
        (status = 404, description = "Prize not found")
    )
)]
/// Apply a partial prize update.
pub async fn update_prize(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(request): Json<PrizeUpdateRequest>,
) -> Result<Json<PrizeResponse>, AppError> {
    let response = catalog_service::update_prize(&state, &id, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/prizes/{id}",
    params(("id" = String, Path, description = "Prize identifier")),
    responses(
        (status = 200, description = "Prize deleted", body = OkResponse),
        (status = 404, description = "Prize not found")
    )
)]
/// Delete a prize and unwind its win status.
pub async fn delete_prize(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    let response = catalog_service::delete_prize(&state, &id).await?;
    Ok(Json(response))
}

/// Configure the prizes routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/prizes", get(list_prizes).post(create_prize))
        .route("/prizes/{id}", put(update_prize).delete(delete_prize))
}
