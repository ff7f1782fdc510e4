//! Routes for the preset number pool.

use axum::{Json, Router, extract::State, routing::{get, post}};

use crate::{
    dto::pool::{
        GeneratePoolRequest, GeneratePoolResponse, ImportPoolRequest, PoolResponse, SetPoolRequest,
    },
    error::AppError,
    services::pool_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/pool",
    responses((status = 200, description = "Current pool", body = PoolResponse))
)]
/// Return the current pool contents.
pub async fn get_pool(State(state): State<SharedState>) -> Json<PoolResponse> {
    Json(pool_service::get_pool(&state).await)
}

#[utoipa::path(
    post,
    path = "/pool",
    request_body = SetPoolRequest,
    responses(
        (status = 200, description = "Pool replaced and win status reset", body = PoolResponse),
        (status = 400, description = "Invalid numbers format")
    )
)]
/// Replace the pool with an explicit token list.
pub async fn set_pool(
    State(state): State<SharedState>,
    Json(request): Json<SetPoolRequest>,
) -> Result<Json<PoolResponse>, AppError> {
    let response = pool_service::set_pool(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/pool/generate",
    request_body = GeneratePoolRequest,
    responses((status = 200, description = "Pool generated", body = GeneratePoolResponse))
)]
/// Generate the pool from range and exclusion rules.
pub async fn generate_pool(
    State(state): State<SharedState>,
    Json(request): Json<GeneratePoolRequest>,
) -> Result<Json<GeneratePoolResponse>, AppError> {
    let response = pool_service::generate_pool(&state, request).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/pool/import",
    request_body = ImportPoolRequest,
    responses(
        (status = 200, description = "Pool imported", body = PoolResponse),
        (status = 400, description = "No valid numbers found")
    )
)]
/// Replace the pool with tokens parsed from CSV-like text.
pub async fn import_pool(
    State(state): State<SharedState>,
    Json(request): Json<ImportPoolRequest>,
) -> Result<Json<PoolResponse>, AppError> {
    let response = pool_service::import_pool(&state, request).await?;
    Ok(Json(response))
}

/// Configure the pool routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/pool", get(get_pool).post(set_pool))
        .route("/pool/generate", post(generate_pool))
        .route("/pool/import", post(import_pool))
}
