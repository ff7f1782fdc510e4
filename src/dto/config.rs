//! Bodies for the configuration resource.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::Config;

/// The full configuration document.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    /// Configuration after any update has been applied.
    pub config: Config,
}

/// Partial configuration update.
///
/// Only provided top-level keys are merged in; nested objects are
/// shallow-merged with the stored values field by field.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdateRequest {
    /// New repeat-win policy.
    pub allow_repeat_win: Option<bool>,
    /// New cards-per-row display value.
    pub numbers_per_row: Option<u32>,
    /// Pool generation rule overrides.
    pub number_pool_config: Option<NumberPoolConfigPatch>,
    /// Font size overrides.
    pub font_sizes: Option<FontSizesPatch>,
    /// Display toggle overrides.
    pub display_settings: Option<DisplaySettingsPatch>,
    /// Font color overrides.
    pub font_colors: Option<FontColorsPatch>,
    /// Check-in identifier shape overrides.
    pub register_settings: Option<RegisterSettingsPatch>,
    /// Replacement calibration map; an empty map clears it.
    pub calibration: Option<IndexMap<String, Vec<String>>>,
}

/// Shallow patch of the pool generation rules.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberPoolConfigPatch {
    /// New inclusive range start.
    pub start: Option<u32>,
    /// New inclusive range end.
    pub end: Option<u32>,
    /// New contains-exclusion list.
    pub exclude_contains: Option<Vec<String>>,
    /// New exact-exclusion list.
    pub exclude_exact: Option<Vec<String>>,
}

/// Shallow patch of the font sizes.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontSizesPatch {
    /// New tier label size.
    pub prize_level: Option<u32>,
    /// New prize name size.
    pub prize_name: Option<u32>,
    /// New sponsor credit size.
    pub sponsor: Option<u32>,
    /// New number card size.
    pub number_card: Option<u32>,
}

/// Shallow patch of the display toggles.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettingsPatch {
    /// New quantity toggle.
    pub show_quantity: Option<bool>,
    /// New sponsor toggle.
    pub show_sponsor: Option<bool>,
    /// New number card border toggle.
    pub show_number_border: Option<bool>,
    /// New number masking toggle.
    pub mask_phone: Option<bool>,
}

/// Shallow patch of the font colors.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontColorsPatch {
    /// New prize name color.
    pub prize_name: Option<String>,
    /// New sponsor credit color.
    pub sponsor: Option<String>,
    /// New number card color.
    pub number_card: Option<String>,
}

/// Shallow patch of the check-in identifier constraints.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSettingsPatch {
    /// New exact identifier length.
    pub length: Option<usize>,
    /// New letters policy.
    pub allow_letters: Option<bool>,
}
