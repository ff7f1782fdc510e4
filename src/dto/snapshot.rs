//! The full display snapshot pushed to clients and served on state GETs.

use indexmap::IndexMap;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dao::models::{
        Config, DisplaySettings, DrawState, FontColors, FontSizes, PrizeBook, Round, WinnerRecord,
    },
    state::DisplaySession,
};

/// Everything a display client needs to render, in one object.
///
/// Combines the volatile session, the prize catalog, the draw ledger, and the
/// display-relevant configuration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullState {
    /// Prize currently selected, if any.
    pub current_prize_id: Option<String>,
    /// Round currently shown.
    pub current_round_id: u32,
    /// Draw count for the next roll.
    pub draw_count: u32,
    /// Whether a roll is in progress.
    pub is_rolling: bool,
    /// Winners of the most recent roll.
    pub winners: Vec<String>,
    /// Candidate pool frozen at roll start; absent between rolls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_pool: Option<Vec<String>>,
    /// Whether the QR code overlay is shown.
    #[serde(rename = "showQRCode")]
    pub show_qrcode: bool,
    /// Message displayed alongside the QR code.
    #[serde(rename = "qrCodeMessage")]
    pub qr_code_message: String,
    /// Prize catalog rounds.
    pub rounds: Vec<Round>,
    /// Remaining winner slots per prize.
    pub prize_remaining: IndexMap<String, u32>,
    /// Winner ledger per prize.
    pub winners_by_prize: IndexMap<String, WinnerRecord>,
    /// Current preset pool.
    pub number_pool: Vec<String>,
    /// Repeat-win policy.
    pub allow_repeat_win: bool,
    /// Number cards per display row.
    pub numbers_per_row: u32,
    /// Cosmetic font sizes.
    pub font_sizes: FontSizes,
    /// Cosmetic display toggles.
    pub display_settings: DisplaySettings,
    /// Cosmetic font colors.
    pub font_colors: FontColors,
}

impl FullState {
    /// Assemble the snapshot from the session and the stored documents.
    pub fn assemble(
        session: &DisplaySession,
        book: &PrizeBook,
        draw: &DrawState,
        config: &Config,
    ) -> Self {
        Self {
            current_prize_id: session.current_prize_id.clone(),
            current_round_id: session.current_round_id,
            draw_count: session.draw_count,
            is_rolling: session.is_rolling,
            winners: session.winners.clone(),
            rolling_pool: session.rolling_pool.clone(),
            show_qrcode: session.show_qrcode,
            qr_code_message: session.qrcode_message.clone(),
            rounds: book.rounds.clone(),
            prize_remaining: draw.prize_remaining.clone(),
            winners_by_prize: draw.winners_by_prize.clone(),
            number_pool: draw.number_pool.clone(),
            allow_repeat_win: config.allow_repeat_win,
            numbers_per_row: config.numbers_per_row,
            font_sizes: config.font_sizes.clone(),
            display_settings: config.display_settings.clone(),
            font_colors: config.font_colors.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_uses_client_key_casing() {
        let snapshot = FullState::assemble(
            &DisplaySession::default(),
            &PrizeBook::default(),
            &DrawState::default(),
            &Config::default(),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.get("showQRCode").is_some());
        assert!(json.get("qrCodeMessage").is_some());
        assert!(json.get("currentPrizeId").is_some());
        assert!(json.get("rollingPool").is_none());
    }
}
