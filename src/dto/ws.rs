//! Push-channel envelope sent to display clients.

use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::snapshot::FullState;

/// Server-to-display event, serialized as `{"type": ..., "payload": ...}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DisplayEvent {
    /// Full snapshot replacing whatever the client holds.
    StateUpdate(Box<FullState>),
    /// The rolling animation started.
    #[serde(rename_all = "camelCase")]
    RollingStart {
        /// Number of tokens that will be drawn.
        count: u32,
        /// Prize being drawn for.
        prize_id: String,
    },
    /// The rolling animation stopped with these winners.
    RollingStop {
        /// Winning tokens in display order.
        winners: Vec<String>,
    },
    /// Win status was reset; clients should re-fetch.
    Reset,
    /// QR code overlay toggled.
    ShowQrcode {
        /// Whether the overlay is now shown.
        show: bool,
        /// Check-in page URL encoded into the code.
        url: String,
        /// Message displayed alongside the code.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_use_the_tagged_envelope() {
        let event = DisplayEvent::RollingStart {
            count: 3,
            prize_id: "1-1".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "rolling_start");
        assert_eq!(json["payload"]["count"], 3);
        assert_eq!(json["payload"]["prizeId"], "1-1");
    }

    #[test]
    fn reset_has_no_payload() {
        let json = serde_json::to_value(DisplayEvent::Reset).unwrap();
        assert_eq!(json["type"], "reset");
        assert!(json.get("payload").is_none());
    }

    #[test]
    fn qrcode_event_carries_url_and_message() {
        let event = DisplayEvent::ShowQrcode {
            show: true,
            url: "http://localhost:3000/register".into(),
            message: "scan to join".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "show_qrcode");
        assert_eq!(json["payload"]["show"], true);
    }
}
