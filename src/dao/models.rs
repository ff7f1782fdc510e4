//! Persisted JSON documents: prize catalog, draw state, configuration, live roster.
//!
//! Field names mirror the JSON files consumed by the display and control
//! clients, hence the camelCase renames.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Width every preset pool token is zero-padded to.
pub const TOKEN_WIDTH: usize = 3;

/// Zero-pad a numeric token to the fixed pool width.
pub fn pad_token(raw: &str) -> String {
    format!("{raw:0>width$}", width = TOKEN_WIDTH)
}

/// Which pool a round draws its candidates from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    /// The pre-generated/imported number pool.
    #[default]
    Preset,
    /// The self-check-in roster gathered during the event.
    Live,
}

/// A single drawable award with a finite number of winner slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prize {
    /// Unique identifier formatted `<roundId>-<seq>`; immutable once created.
    pub id: String,
    /// Display tier label (e.g. "First Prize").
    pub level: String,
    /// Prize name shown on the big screen.
    pub name: String,
    /// Total winner slots for this prize.
    pub quantity: u32,
    /// Accent color used by the display.
    pub color: String,
    /// Optional sponsor credit.
    #[serde(default)]
    pub sponsor: String,
    /// Optional reference to an uploaded prize image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A named phase of the event grouping prizes and a pool type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    /// Unique, monotonically assigned identifier.
    pub id: u32,
    /// Display name of the round.
    pub name: String,
    /// Pool the round draws from; legacy files omit it and default to preset.
    #[serde(default)]
    pub pool_type: PoolType,
    /// Prizes owned by this round, in display order.
    #[serde(default)]
    pub prizes: Vec<Prize>,
}

/// The prize catalog document (`prizes.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PrizeBook {
    /// All rounds in display order.
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl PrizeBook {
    /// Locate a prize together with its owning round.
    pub fn find_prize(&self, prize_id: &str) -> Option<(&Round, &Prize)> {
        self.rounds.iter().find_map(|round| {
            round
                .prizes
                .iter()
                .find(|prize| prize.id == prize_id)
                .map(|prize| (round, prize))
        })
    }

    /// Next unique round identifier (max + 1, starting at 1).
    pub fn next_round_id(&self) -> u32 {
        self.rounds.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    /// Initial remaining-slot counters seeded from every prize's quantity.
    pub fn initial_remaining(&self) -> IndexMap<String, u32> {
        self.rounds
            .iter()
            .flat_map(|round| round.prizes.iter())
            .map(|prize| (prize.id.clone(), prize.quantity))
            .collect()
    }
}

/// Winner ledger for one prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WinnerRecord {
    /// Prize tier label at the time of the first draw.
    pub level: String,
    /// Prize name at the time of the first draw.
    pub name: String,
    /// Winning tokens, append-only within the prize.
    pub numbers: Vec<String>,
}

/// The durable draw ledger document (`draw-state.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawState {
    /// Current preset pool snapshot.
    #[serde(default)]
    pub number_pool: Vec<String>,
    /// Remaining winner slots per prize id.
    #[serde(default)]
    pub prize_remaining: IndexMap<String, u32>,
    /// Winner ledger per prize id.
    #[serde(default)]
    pub winners_by_prize: IndexMap<String, WinnerRecord>,
    /// Every token that has ever won any prize, for cross-prize exclusion.
    #[serde(default)]
    pub all_winners: Vec<String>,
}

/// The live check-in roster document (`live-pool.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LiveRoster {
    /// Whether new registrations are accepted.
    #[serde(default)]
    pub is_open: bool,
    /// Registered identifiers in submission order.
    #[serde(default)]
    pub registrations: Vec<String>,
    /// Epoch milliseconds of the last clear, so clients detect a wipe.
    #[serde(default)]
    pub cleared_at: u64,
}

/// How the preset pool was last populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PoolSource {
    /// Generated from the configured numeric range.
    #[default]
    Auto,
    /// Entered or imported by the operator.
    Manual,
}

/// Numeric range and exclusion rules used to generate the preset pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NumberPoolConfig {
    /// Last population method.
    #[serde(default, rename = "type")]
    pub source: PoolSource,
    /// Inclusive range start.
    #[serde(default = "default_pool_start")]
    pub start: u32,
    /// Inclusive range end.
    #[serde(default = "default_pool_end")]
    pub end: u32,
    /// Exclude numbers whose digits contain any of these substrings.
    #[serde(default)]
    pub exclude_contains: Vec<String>,
    /// Exclude numbers exactly equal (unpadded) to any of these.
    #[serde(default)]
    pub exclude_exact: Vec<String>,
    /// Legacy name for `excludeContains`; merged at load and never written back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
}

impl Default for NumberPoolConfig {
    fn default() -> Self {
        Self {
            source: PoolSource::Auto,
            start: default_pool_start(),
            end: default_pool_end(),
            exclude_contains: vec!["4".into(), "13".into()],
            exclude_exact: Vec::new(),
            exclude_patterns: None,
        }
    }
}

fn default_pool_start() -> u32 {
    1
}

fn default_pool_end() -> u32 {
    300
}

/// Display font sizes in pixels (cosmetic, passed through to clients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    /// Prize tier label size.
    pub prize_level: u32,
    /// Prize name size.
    pub prize_name: u32,
    /// Sponsor credit size.
    pub sponsor: u32,
    /// Winning number card size.
    pub number_card: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            prize_level: 56,
            prize_name: 42,
            sponsor: 28,
            number_card: 38,
        }
    }
}

/// Display toggles (cosmetic, passed through to clients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    /// Show the remaining quantity next to the prize.
    #[serde(default = "default_true")]
    pub show_quantity: bool,
    /// Show the sponsor credit.
    #[serde(default = "default_true")]
    pub show_sponsor: bool,
    /// Draw a border around each number card.
    #[serde(default = "default_true")]
    pub show_number_border: bool,
    /// Mask the middle digits of winning numbers on screen.
    #[serde(default)]
    pub mask_phone: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_quantity: true,
            show_sponsor: true,
            show_number_border: true,
            mask_phone: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Display font colors (cosmetic, passed through to clients).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FontColors {
    /// Prize name color.
    pub prize_name: String,
    /// Sponsor credit color.
    pub sponsor: String,
    /// Number card text and border color.
    pub number_card: String,
}

impl Default for FontColors {
    fn default() -> Self {
        Self {
            prize_name: "#ffffff".into(),
            sponsor: "#eeeeee".into(),
            number_card: "#ffd700".into(),
        }
    }
}

/// Shape constraints for identifiers submitted through the check-in flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSettings {
    /// Exact identifier length.
    pub length: usize,
    /// Whether letters are accepted in addition to digits.
    pub allow_letters: bool,
}

impl Default for RegisterSettings {
    fn default() -> Self {
        Self {
            length: 6,
            allow_letters: false,
        }
    }
}

/// The configuration document (`config.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Whether one token may win under several prizes.
    #[serde(default)]
    pub allow_repeat_win: bool,
    /// Number cards per display row.
    #[serde(default = "default_numbers_per_row")]
    pub numbers_per_row: u32,
    /// Preset pool generation rules.
    #[serde(default)]
    pub number_pool_config: NumberPoolConfig,
    /// Cosmetic font sizes.
    #[serde(default)]
    pub font_sizes: FontSizes,
    /// Cosmetic display toggles.
    #[serde(default)]
    pub display_settings: DisplaySettings,
    /// Cosmetic font colors.
    #[serde(default)]
    pub font_colors: FontColors,
    /// Roster identifier shape constraints.
    #[serde(default)]
    pub register_settings: RegisterSettings,
    /// Forced winners per prize id, consumed on use; absent once empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<IndexMap<String, Vec<String>>>,
}

fn default_numbers_per_row() -> u32 {
    10
}

impl Config {
    /// Fold legacy shapes into the current one so read sites never branch.
    ///
    /// `excludePatterns` was renamed to `excludeContains`; a legacy file may
    /// carry either.
    pub fn migrate(mut self) -> Self {
        if let Some(patterns) = self.number_pool_config.exclude_patterns.take()
            && self.number_pool_config.exclude_contains.is_empty()
        {
            self.number_pool_config.exclude_contains = patterns;
        }
        self
    }

    /// The calibration list for a prize, empty when none is configured.
    pub fn calibration_for(&self, prize_id: &str) -> &[String] {
        self.calibration
            .as_ref()
            .and_then(|map| map.get(prize_id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_token_pads_to_three_digits() {
        assert_eq!(pad_token("7"), "007");
        assert_eq!(pad_token("42"), "042");
        assert_eq!(pad_token("300"), "300");
        assert_eq!(pad_token("1234"), "1234");
    }

    #[test]
    fn legacy_exclude_patterns_are_migrated() {
        let config: Config = serde_json::from_str(
            r#"{"numberPoolConfig":{"type":"auto","start":1,"end":50,"excludePatterns":["4"]}}"#,
        )
        .unwrap();
        let config = config.migrate();
        assert_eq!(config.number_pool_config.exclude_contains, vec!["4"]);
        assert!(config.number_pool_config.exclude_patterns.is_none());
    }

    #[test]
    fn migrate_prefers_explicit_exclude_contains() {
        let config: Config = serde_json::from_str(
            r#"{"numberPoolConfig":{"excludeContains":["13"],"excludePatterns":["4"]}}"#,
        )
        .unwrap();
        let config = config.migrate();
        assert_eq!(config.number_pool_config.exclude_contains, vec!["13"]);
    }

    #[test]
    fn round_without_pool_type_defaults_to_preset() {
        let round: Round = serde_json::from_str(r#"{"id":1,"name":"Opening","prizes":[]}"#).unwrap();
        assert_eq!(round.pool_type, PoolType::Preset);
    }

    #[test]
    fn display_toggles_round_trip_through_config_files() {
        let config: Config = serde_json::from_str(
            r#"{"displaySettings":{"showQuantity":true,"showSponsor":false,"showNumberBorder":false,"maskPhone":true}}"#,
        )
        .unwrap();
        assert!(!config.display_settings.show_number_border);
        assert!(config.display_settings.mask_phone);

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["displaySettings"]["showNumberBorder"], false);
        assert_eq!(json["displaySettings"]["maskPhone"], true);
    }

    #[test]
    fn display_toggles_missing_from_old_files_get_defaults() {
        let config: Config = serde_json::from_str(
            r#"{"displaySettings":{"showQuantity":false,"showSponsor":true}}"#,
        )
        .unwrap();
        assert!(!config.display_settings.show_quantity);
        assert!(config.display_settings.show_number_border);
        assert!(!config.display_settings.mask_phone);
    }

    #[test]
    fn empty_calibration_is_not_serialized() {
        let config = Config::default();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("calibration").is_none());
    }
}
