//! Shared application state: session, broadcast hub, socket registry, store.

mod hub;
pub mod session;

use std::sync::Arc;

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::{Mutex, MutexGuard, RwLock, mpsc};
use uuid::Uuid;

use crate::dao::FileStore;

pub use self::hub::EventHub;
pub use self::session::{DisplaySession, InvalidTransition, SessionPatch, SessionPhase};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Handle used to push frames to one connected display socket.
#[derive(Clone)]
pub struct DisplayClient {
    /// Connection identifier, assigned at accept time.
    pub id: Uuid,
    /// Writer-task channel for this socket.
    pub tx: mpsc::UnboundedSender<Message>,
}

/// Central application state shared by every handler.
pub struct AppState {
    store: FileStore,
    hub: EventHub,
    clients: DashMap<Uuid, DisplayClient>,
    session: RwLock<DisplaySession>,
    write_gate: Mutex<()>,
}

impl AppState {
    /// Construct the state wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: FileStore) -> SharedState {
        Arc::new(Self {
            store,
            hub: EventHub::new(EVENT_CHANNEL_CAPACITY),
            clients: DashMap::new(),
            session: RwLock::new(DisplaySession::default()),
            write_gate: Mutex::new(()),
        })
    }

    /// File-backed document store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Broadcast hub feeding every display socket.
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }

    /// Registry of active display sockets keyed by connection id.
    pub fn clients(&self) -> &DashMap<Uuid, DisplayClient> {
        &self.clients
    }

    /// Number of display sockets currently connected.
    pub fn connected_displays(&self) -> usize {
        self.clients.len()
    }

    /// Volatile display session.
    pub fn session(&self) -> &RwLock<DisplaySession> {
        &self.session
    }

    /// Acquire the gate serializing every read-mutate-persist sequence.
    ///
    /// All mutations of the stored documents must run under this guard so
    /// concurrent requests never interleave their load/save pairs.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }
}
