/// Rounds and prizes CRUD.
pub mod catalog_service;
/// Configuration reads and partial updates.
pub mod config_service;
/// Display session orchestration.
pub mod control_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Candidate resolution, draw engine, and resets.
pub mod draw_service;
/// Health check service.
pub mod health_service;
/// Preset number pool management.
pub mod pool_service;
/// Live check-in roster management.
pub mod roster_service;
/// Typed broadcast helpers for display events.
pub mod ws_events;
/// WebSocket connection handling for displays.
pub mod ws_service;
