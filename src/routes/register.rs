//! Routes for the live check-in resource.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::{
    dto::{
        common::OkResponse,
        register::{
            RegisterStatusResponse, RegistrationOpenResponse, RegistrationOutcome,
            SetRegistrationOpenRequest, SubmitRegistrationRequest,
        },
    },
    error::AppError,
    services::roster_service,
    state::SharedState,
};

#[utoipa::path(
    get,
    path = "/register",
    responses((status = 200, description = "Roster and registration status", body = RegisterStatusResponse))
)]
/// Return the roster, the open flag, and the identifier constraints.
pub async fn register_status(State(state): State<SharedState>) -> Json<RegisterStatusResponse> {
    Json(roster_service::status(&state).await)
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = SubmitRegistrationRequest,
    responses(
        (status = 200, description = "Identifier registered", body = RegistrationOutcome),
        (status = 400, description = "Rejected submission", body = RegistrationOutcome)
    )
)]
/// Submit an identifier; rejections carry a participant-facing message.
pub async fn submit_registration(
    State(state): State<SharedState>,
    Json(request): Json<SubmitRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = roster_service::submit(&state, &request.employee_id).await?;
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(outcome)))
}

#[utoipa::path(
    put,
    path = "/register",
    request_body = SetRegistrationOpenRequest,
    responses((status = 200, description = "Registration toggled", body = RegistrationOpenResponse))
)]
/// Open or close registration.
pub async fn set_registration_open(
    State(state): State<SharedState>,
    Json(request): Json<SetRegistrationOpenRequest>,
) -> Result<Json<RegistrationOpenResponse>, AppError> {
    let response = roster_service::set_open(&state, request.is_open).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/register",
    responses((status = 200, description = "Roster cleared", body = OkResponse))
)]
/// Clear every registration.
pub async fn clear_registrations(
    State(state): State<SharedState>,
) -> Result<Json<OkResponse>, AppError> {
    let response = roster_service::clear(&state).await?;
    Ok(Json(response))
}

/// Configure the check-in routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route(
        "/register",
        get(register_status)
            .post(submit_registration)
            .put(set_registration_open)
            .delete(clear_registrations),
    )
}
