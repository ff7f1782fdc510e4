//! Bodies for the preset number pool resource.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::{NumberPoolConfig, pad_token};

/// A token submitted to the manual pool setter; clients send either bare
/// numbers or strings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PoolToken {
    /// Bare numeric token.
    Number(u64),
    /// String token.
    Text(String),
}

impl PoolToken {
    /// Normalize into the zero-padded pool form.
    pub fn into_token(self) -> String {
        match self {
            PoolToken::Number(value) => pad_token(&value.to_string()),
            PoolToken::Text(value) => pad_token(&value),
        }
    }
}

/// Request replacing the pool with an explicit token list.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetPoolRequest {
    /// Tokens, normalized and deduplicated server side.
    pub numbers: Vec<PoolToken>,
}

/// Request to (re)generate the pool from range and exclusion rules.
///
/// Provided fields overwrite the stored generation config before generating.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePoolRequest {
    /// Inclusive range start.
    pub start: Option<u32>,
    /// Inclusive range end.
    pub end: Option<u32>,
    /// Exclude numbers whose digits contain any of these substrings.
    pub exclude_contains: Option<Vec<String>>,
    /// Exclude numbers exactly equal (unpadded) to any of these.
    pub exclude_exact: Option<Vec<String>>,
    /// Legacy alias for `excludeContains`, honored when the new key is absent.
    pub exclude_patterns: Option<Vec<String>>,
}

/// Request importing tokens from CSV-like bulk text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ImportPoolRequest {
    /// Tokens separated by commas or newlines; non-numeric entries are dropped.
    pub csv: String,
}

/// Current pool contents.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PoolResponse {
    /// Pool tokens in stored order.
    pub number_pool: Vec<String>,
    /// Token count.
    pub count: usize,
}

/// Pool contents after generation, echoing the effective rules.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePoolResponse {
    /// Generated pool tokens.
    pub number_pool: Vec<String>,
    /// Token count.
    pub count: usize,
    /// Generation rules after applying the request overrides.
    pub config: NumberPoolConfig,
}
