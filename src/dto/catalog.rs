//! Bodies for the rounds and prizes resources.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dao::models::{PoolType, Prize, Round};

/// Request to create a round.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundCreateRequest {
    /// Display name; must not be empty.
    #[validate(length(min = 1, message = "Missing name"))]
    pub name: String,
    /// Pool the round draws from; defaults to the preset pool.
    pub pool_type: Option<PoolType>,
}

/// Request to rename a round or switch its pool type.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoundUpdateRequest {
    /// New display name; must not be empty.
    #[validate(length(min = 1, message = "Missing name"))]
    pub name: String,
    /// New pool type, kept unchanged when omitted.
    pub pool_type: Option<PoolType>,
}

/// All rounds.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundsResponse {
    /// Rounds in display order.
    pub rounds: Vec<Round>,
}

/// A single round.
#[derive(Debug, Serialize, ToSchema)]
pub struct RoundResponse {
    /// The created or updated round.
    pub round: Round,
}

/// Query parameters accepted by the prize listing.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeListQuery {
    /// Restrict the listing to one round.
    pub round_id: Option<u32>,
}

/// Request to create a prize inside a round.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeCreateRequest {
    /// Owning round.
    pub round_id: u32,
    /// Display tier label.
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub level: String,
    /// Prize name.
    #[validate(length(min = 1, message = "Missing required fields"))]
    pub name: String,
    /// Total winner slots.
    pub quantity: u32,
    /// Accent color, defaulting to gold.
    pub color: Option<String>,
    /// Optional sponsor credit.
    pub sponsor: Option<String>,
}

/// Partial update of a prize; omitted fields are kept unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeUpdateRequest {
    /// New tier label.
    pub level: Option<String>,
    /// New prize name.
    pub name: Option<String>,
    /// New total winner slots.
    pub quantity: Option<u32>,
    /// New accent color.
    pub color: Option<String>,
    /// New sponsor credit; an empty string clears it.
    pub sponsor: Option<String>,
    /// New image reference; an explicit `null` removes the image.
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

/// A single prize.
#[derive(Debug, Serialize, ToSchema)]
pub struct PrizeResponse {
    /// The created or updated prize.
    pub prize: Prize,
}

/// A prize annotated with its owning round, for the flat listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeWithRound {
    /// The prize itself, flattened into the object.
    #[serde(flatten)]
    pub prize: Prize,
    /// Owning round id.
    pub round_id: u32,
    /// Owning round name.
    pub round_name: String,
}

/// Prize listing, flat across all rounds or scoped to one.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum PrizesResponse {
    /// Prizes of the requested round.
    ForRound {
        /// Prizes in display order.
        prizes: Vec<Prize>,
    },
    /// Every prize, annotated with its round.
    All {
        /// Prizes in round order.
        prizes: Vec<PrizeWithRound>,
    },
}
