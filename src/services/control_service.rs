//! Orchestration of the display session: start/stop rolling, state patches,
//! and the QR code overlay.

use axum::http::{HeaderMap, header};
use tracing::info;

use crate::{
    dto::{
        common::OkResponse,
        control::{
            DisplayStatePatch, QrcodeStatusResponse, QrcodeToggleRequest, QrcodeToggleResponse,
            StartRollingRequest,
        },
        draw::DrawResponse,
        snapshot::FullState,
    },
    error::ServiceError,
    services::{draw_service, pool_service, ws_events},
    state::SharedState,
};

/// Start the rolling animation for a prize.
///
/// The candidate pool is validated and frozen before the transition so the
/// display scrolls only through tokens that could legitimately win.
pub async fn start_rolling(
    state: &SharedState,
    request: StartRollingRequest,
) -> Result<OkResponse, ServiceError> {
    let _gate = state.lock_writes().await;

    let store = state.store();
    let book = store.load_prizes();
    let draw = store.load_draw_state();
    let config = store.load_config();
    let roster = store.load_roster();

    let candidates =
        draw_service::resolve_candidates(&book, &draw, &config, &roster, &request.prize_id)?;
    let remaining = draw
        .prize_remaining
        .get(&request.prize_id)
        .copied()
        .unwrap_or(0);
    if remaining == 0 {
        return Err(ServiceError::InvalidState(
            "No numbers available: prize quota reached".into(),
        ));
    }
    if candidates.is_empty() {
        return Err(ServiceError::InvalidState(
            "No numbers available: pool is empty".into(),
        ));
    }

    state
        .session()
        .write()
        .await
        .begin_roll(request.prize_id.clone(), request.count, candidates)?;

    info!(prize_id = %request.prize_id, count = request.count, "rolling started");
    ws_events::broadcast_rolling_start(state, request.count, &request.prize_id);
    Ok(OkResponse::ok())
}

/// Stop the roll, draw the winners, and push the results to every display.
///
/// The whole stop-then-draw sequence runs under the write gate so concurrent
/// stops can never double-draw against the same remaining count.
pub async fn stop_rolling(state: &SharedState) -> Result<DrawResponse, ServiceError> {
    let _gate = state.lock_writes().await;

    let (prize_id, count) = {
        let session = state.session().read().await;
        if !session.is_rolling {
            return Err(ServiceError::InvalidState("Not rolling".into()));
        }
        let prize_id = session
            .current_prize_id
            .clone()
            .ok_or_else(|| ServiceError::InvalidState("Not rolling".into()))?;
        (prize_id, session.draw_count)
    };

    match draw_service::draw_locked(state, &prize_id, count) {
        Ok(response) => {
            state
                .session()
                .write()
                .await
                .finish_roll(response.winners.clone())?;
            ws_events::broadcast_rolling_stop(state, &response.winners);
            ws_events::broadcast_state_update(state).await;
            Ok(response)
        }
        Err(err) => {
            // The roll ends either way; the display returns to armed with no
            // winners and the error reaches the operator.
            state.session().write().await.abort_roll();
            Err(err)
        }
    }
}

/// Full snapshot of session, catalog, ledger, and display configuration.
///
/// A pristine ledger is seeded on first access: the pool is generated from
/// the configured rules and every prize starts with its full quota.
pub async fn get_full_state(state: &SharedState) -> Result<FullState, ServiceError> {
    let _gate = state.lock_writes().await;

    let store = state.store();
    let book = store.load_prizes();
    let mut draw = store.load_draw_state();
    let config = store.load_config();

    if draw.number_pool.is_empty() && draw.winners_by_prize.is_empty() && draw.all_winners.is_empty()
    {
        draw.number_pool = pool_service::generate_from_rules(&config.number_pool_config);
        draw.prize_remaining = book.initial_remaining();
        store.save_draw_state(&draw)?;
        info!(count = draw.number_pool.len(), "seeded initial number pool");
    }

    let session = state.session().read().await;
    Ok(FullState::assemble(&session, &book, &draw, &config))
}

/// Apply a partial session update and broadcast the resulting snapshot.
pub async fn patch_state(
    state: &SharedState,
    patch: DisplayStatePatch,
) -> Result<FullState, ServiceError> {
    let _gate = state.lock_writes().await;

    let show = patch.show_qrcode;
    let message = patch.qr_code_message.clone();
    {
        let mut session = state.session().write().await;
        session.apply_patch(patch.into())?;
        if let Some(show) = show {
            session.show_qrcode = show;
        }
        if let Some(message) = message {
            session.qrcode_message = message;
        }
    }

    let store = state.store();
    let book = store.load_prizes();
    let draw = store.load_draw_state();
    let config = store.load_config();
    let snapshot = {
        let session = state.session().read().await;
        FullState::assemble(&session, &book, &draw, &config)
    };

    ws_events::broadcast_snapshot(state, snapshot.clone());
    Ok(snapshot)
}

/// Current QR code overlay status.
pub async fn qrcode_status(state: &SharedState) -> QrcodeStatusResponse {
    let session = state.session().read().await;
    QrcodeStatusResponse {
        show_qrcode: session.show_qrcode,
        qr_code_message: session.qrcode_message.clone(),
    }
}

/// Toggle the QR code overlay and tell displays where the check-in page is.
///
/// The check-in URL is derived from the request's `Host` header so the code
/// points at whatever address the operator reached the server through.
pub async fn toggle_qrcode(
    state: &SharedState,
    headers: &HeaderMap,
    request: QrcodeToggleRequest,
) -> QrcodeToggleResponse {
    let (show, message) = {
        let mut session = state.session().write().await;
        let show = request.show.unwrap_or(!session.show_qrcode);
        let message = request.message.map(|m| m.trim().to_string());
        session.set_qrcode(show, message);
        (show, session.qrcode_message.clone())
    };

    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost:3000");
    let protocol = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let register_url = format!("{protocol}://{host}/register");

    ws_events::broadcast_show_qrcode(state, show, &register_url, &message);

    QrcodeToggleResponse {
        success: true,
        show_qrcode: show,
        register_url,
        qr_code_message: message,
    }
}
