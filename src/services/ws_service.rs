//! Display socket lifecycle: registry bookkeeping and hub fan-out.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::{
    sync::{broadcast::error::RecvError, mpsc},
    task::JoinHandle,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    services::ws_events,
    state::{DisplayClient, SharedState},
};

/// Handle the full lifecycle of one display WebSocket connection.
///
/// The channel is server-to-client only: inbound frames are limited to
/// ping/pong and close. Hub events are forwarded until the client disconnects
/// or falls so far behind that the broadcast channel drops it.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound events flowing even while we await
    // inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let client_id = Uuid::new_v4();
    state.clients().insert(
        client_id,
        DisplayClient {
            id: client_id,
            tx: outbound_tx.clone(),
        },
    );
    info!(id = %client_id, connected = state.connected_displays(), "display connected");

    let forward_task = spawn_forwarder(&state, outbound_tx.clone());

    // Greet the new display with the current snapshot so it renders without
    // waiting for its first REST fetch.
    ws_events::send_snapshot_to(&state, client_id).await;

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(id = %client_id, "display closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            // Displays send nothing else; ignore stray frames.
            Ok(Message::Text(_)) | Ok(Message::Binary(_)) | Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(id = %client_id, error = %err, "websocket error");
                break;
            }
        }
    }

    forward_task.abort();
    state.clients().remove(&client_id);
    info!(id = %client_id, connected = state.connected_displays(), "display disconnected");

    finalize(writer_task, outbound_tx).await;
}

/// Forward hub events into the writer channel, skipping over lag gaps.
fn spawn_forwarder(
    state: &SharedState,
    outbound_tx: mpsc::UnboundedSender<Message>,
) -> JoinHandle<()> {
    let mut events = state.hub().subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = outbound_tx.closed() => break,
                received = events.recv() => match received {
                    Ok(payload) => {
                        if outbound_tx.send(Message::Text(payload.into())).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(skipped)) => {
                        // The client recovers by re-fetching the full state.
                        warn!(skipped, "display lagged behind the broadcast channel");
                        continue;
                    }
                },
            }
        }
    })
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
