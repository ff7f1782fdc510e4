//! Request/response bodies for the HTTP surface and the push channel.

use serde::{Deserialize, Deserializer};

pub mod catalog;
pub mod common;
pub mod config;
pub mod control;
pub mod draw;
pub mod health;
pub mod pool;
pub mod register;
pub mod snapshot;
pub mod ws;

/// Deserialize a field so an absent key, an explicit `null`, and a value are
/// three distinct states (`None`, `Some(None)`, `Some(Some(_))`).
///
/// Pair with `#[serde(default)]` on the field.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
