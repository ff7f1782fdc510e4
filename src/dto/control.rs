//! Bodies for the draw control surface.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::SessionPatch;

/// Request to start the rolling animation for a prize.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartRollingRequest {
    /// Number of tokens to draw when the roll stops.
    #[validate(range(min = 1, message = "Invalid count"))]
    pub count: u32,
    /// Prize to draw for.
    #[validate(length(min = 1, message = "Invalid prizeId"))]
    pub prize_id: String,
}

/// Partial update of the display session, applied between rolls.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStatePatch {
    /// New prize selection; an explicit `null` clears it.
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub current_prize_id: Option<Option<String>>,
    /// New round shown on the display.
    pub current_round_id: Option<u32>,
    /// New draw count.
    pub draw_count: Option<u32>,
    /// New winners shown on the display.
    pub winners: Option<Vec<String>>,
    /// New QR code visibility.
    #[serde(default, rename = "showQRCode")]
    pub show_qrcode: Option<bool>,
    /// New QR code message.
    #[serde(default, rename = "qrCodeMessage")]
    pub qr_code_message: Option<String>,
}

impl From<DisplayStatePatch> for SessionPatch {
    fn from(patch: DisplayStatePatch) -> Self {
        SessionPatch {
            current_prize_id: patch.current_prize_id,
            current_round_id: patch.current_round_id,
            draw_count: patch.draw_count,
            winners: patch.winners,
        }
    }
}

/// Request toggling the QR code overlay.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct QrcodeToggleRequest {
    /// New visibility; omitted means "flip the current value".
    pub show: Option<bool>,
    /// New message; kept unchanged when omitted.
    pub message: Option<String>,
}

/// Current QR code overlay status.
#[derive(Debug, Serialize, ToSchema)]
pub struct QrcodeStatusResponse {
    /// Whether the overlay is shown.
    #[serde(rename = "showQRCode")]
    pub show_qrcode: bool,
    /// Message displayed alongside the code.
    #[serde(rename = "qrCodeMessage")]
    pub qr_code_message: String,
}

/// Acknowledgement of a QR code toggle.
#[derive(Debug, Serialize, ToSchema)]
pub struct QrcodeToggleResponse {
    /// Always `true`.
    pub success: bool,
    /// Visibility now in effect.
    #[serde(rename = "showQRCode")]
    pub show_qrcode: bool,
    /// Check-in page URL encoded into the QR code.
    #[serde(rename = "registerUrl")]
    pub register_url: String,
    /// Message now in effect.
    #[serde(rename = "qrCodeMessage")]
    pub qr_code_message: String,
}
