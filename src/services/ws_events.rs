//! Typed broadcast helpers, one per display event.

use axum::extract::ws::Message;
use tracing::warn;
use uuid::Uuid;

use crate::{
    dto::{snapshot::FullState, ws::DisplayEvent},
    state::SharedState,
};

/// Broadcast an already assembled snapshot.
pub fn broadcast_snapshot(state: &SharedState, snapshot: FullState) {
    state
        .hub()
        .publish(&DisplayEvent::StateUpdate(Box::new(snapshot)));
}

/// Assemble the current snapshot from the store and session, then broadcast it.
pub async fn broadcast_state_update(state: &SharedState) {
    let store = state.store();
    let book = store.load_prizes();
    let draw = store.load_draw_state();
    let config = store.load_config();
    let snapshot = {
        let session = state.session().read().await;
        FullState::assemble(&session, &book, &draw, &config)
    };
    broadcast_snapshot(state, snapshot);
}

/// Push the current snapshot to one display through its registry entry,
/// bypassing the hub.
///
/// Used right after a socket connects so a (re)joining display renders
/// without waiting for its first REST fetch.
pub async fn send_snapshot_to(state: &SharedState, client_id: Uuid) {
    let store = state.store();
    let book = store.load_prizes();
    let draw = store.load_draw_state();
    let config = store.load_config();
    let snapshot = {
        let session = state.session().read().await;
        FullState::assemble(&session, &book, &draw, &config)
    };

    let event = DisplayEvent::StateUpdate(Box::new(snapshot));
    let payload = match serde_json::to_string(&event) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "failed to serialize snapshot");
            return;
        }
    };
    if let Some(client) = state.clients().get(&client_id) {
        let _ = client.tx.send(Message::Text(payload.into()));
    }
}

/// Announce that the rolling animation started.
pub fn broadcast_rolling_start(state: &SharedState, count: u32, prize_id: &str) {
    state.hub().publish(&DisplayEvent::RollingStart {
        count,
        prize_id: prize_id.to_string(),
    });
}

/// Announce that the rolling animation stopped with these winners.
pub fn broadcast_rolling_stop(state: &SharedState, winners: &[String]) {
    state.hub().publish(&DisplayEvent::RollingStop {
        winners: winners.to_vec(),
    });
}

/// Announce a full win-status reset.
pub fn broadcast_reset(state: &SharedState) {
    state.hub().publish(&DisplayEvent::Reset);
}

/// Announce a QR code overlay toggle.
pub fn broadcast_show_qrcode(state: &SharedState, show: bool, url: &str, message: &str) {
    state.hub().publish(&DisplayEvent::ShowQrcode {
        show,
        url: url.to_string(),
        message: message.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::FileStore,
        state::{AppState, DisplayClient},
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn new_connections_receive_the_current_snapshot() {
        let dir = std::env::temp_dir().join(format!("lucky-draw-test-{}", Uuid::new_v4()));
        let state = AppState::new(FileStore::new(dir));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = Uuid::new_v4();
        state.clients().insert(id, DisplayClient { id, tx });

        send_snapshot_to(&state, id).await;

        match rx.recv().await {
            Some(Message::Text(payload)) => {
                assert!(payload.contains("state_update"));
                assert!(payload.contains("showQRCode"));
            }
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn snapshot_push_to_a_gone_client_is_a_no_op() {
        let dir = std::env::temp_dir().join(format!("lucky-draw-test-{}", Uuid::new_v4()));
        let state = AppState::new(FileStore::new(dir));
        send_snapshot_to(&state, Uuid::new_v4()).await;
        assert_eq!(state.connected_displays(), 0);
    }
}
