//! HTTP route trees, one per resource.

use axum::Router;

use crate::state::SharedState;

pub mod config;
pub mod control;
pub mod docs;
pub mod draw;
pub mod health;
pub mod pool;
pub mod prizes;
pub mod register;
pub mod rounds;
pub mod ws;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(rounds::router())
        .merge(prizes::router())
        .merge(pool::router())
        .merge(register::router())
        .merge(config::router())
        .merge(control::router())
        .merge(draw::router())
        .merge(ws::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
