//! Bodies for the direct draw and reset endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::{DrawState, WinnerRecord};

/// Request to draw winners immediately, bypassing the display session.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    /// Prize to draw for.
    #[validate(length(min = 1, message = "Invalid prizeId"))]
    pub prize_id: String,
    /// Number of tokens requested.
    #[validate(range(min = 1, message = "Invalid count"))]
    pub count: u32,
}

/// Outcome of a draw, echoing the updated ledger.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawResponse {
    /// Winning tokens in display order.
    pub winners: Vec<String>,
    /// Preset pool after removals.
    pub number_pool: Vec<String>,
    /// Remaining winner slots per prize.
    pub prize_remaining: IndexMap<String, u32>,
    /// Winner ledger per prize.
    pub winners_by_prize: IndexMap<String, WinnerRecord>,
}

/// Request to reset win status, for one prize or for everything.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetRequest {
    /// Prize to reset; omitted means reset everything.
    pub prize_id: Option<String>,
}

/// Draw ledger after a reset.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetResponse {
    /// The updated ledger, flattened into the object.
    #[serde(flatten)]
    pub state: DrawState,
    /// Echoed prize id on a single-prize reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_prize_id: Option<String>,
    /// Pool size after a full reset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_numbers: Option<usize>,
}
