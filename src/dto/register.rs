//! Bodies for the live check-in resource.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::RegisterSettings;

/// Current roster and registration status.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStatusResponse {
    /// Whether new registrations are accepted.
    pub is_open: bool,
    /// Registered identifiers in submission order.
    pub registrations: Vec<String>,
    /// Registration count.
    pub count: usize,
    /// Identifier shape constraints, for client-side validation.
    pub register_settings: RegisterSettings,
    /// Monotonic marker bumped on every clear, so clients detect a wipe.
    pub version: u64,
}

/// A check-in submission.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationRequest {
    /// Identifier to register.
    pub employee_id: String,
}

/// Outcome of a check-in submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationOutcome {
    /// Whether the identifier was accepted.
    pub success: bool,
    /// Human-readable reason shown to the participant.
    pub message: String,
}

/// Request to open or close registration.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetRegistrationOpenRequest {
    /// New open flag.
    pub is_open: bool,
}

/// Acknowledgement echoing the new open flag.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationOpenResponse {
    /// Always `true`.
    pub success: bool,
    /// The open flag now in effect.
    pub is_open: bool,
}
