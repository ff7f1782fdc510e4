//! Persistence layer: documents and the file-backed store.

pub mod file_store;
pub mod models;
pub mod storage;

pub use file_store::FileStore;
