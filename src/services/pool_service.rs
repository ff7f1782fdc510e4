//! Preset number pool management: manual set, rule-based generation, import.

use indexmap::IndexSet;
use tracing::info;

use crate::{
    dao::models::{NumberPoolConfig, PoolSource, pad_token},
    dto::pool::{
        GeneratePoolRequest, GeneratePoolResponse, ImportPoolRequest, PoolResponse, PoolToken,
        SetPoolRequest,
    },
    error::ServiceError,
    services::draw_service,
    state::SharedState,
};

/// Current pool contents.
pub async fn get_pool(state: &SharedState) -> PoolResponse {
    let draw = state.store().load_draw_state();
    PoolResponse {
        count: draw.number_pool.len(),
        number_pool: draw.number_pool,
    }
}

/// Replace the pool with an explicit token list and reset all win status.
///
/// Resetting keeps stale winners from pointing at tokens that are no longer
/// in the pool.
pub async fn set_pool(
    state: &SharedState,
    request: SetPoolRequest,
) -> Result<PoolResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    state.session().read().await.ensure_not_rolling("replace the pool")?;

    let tokens: IndexSet<String> = request
        .numbers
        .into_iter()
        .map(PoolToken::into_token)
        .collect();

    let store = state.store();
    let book = store.load_prizes();
    let mut draw = store.load_draw_state();
    draw.number_pool = tokens.into_iter().collect();
    draw_service::reset_all(&book, &mut draw);
    store.save_draw_state(&draw)?;

    info!(count = draw.number_pool.len(), "pool replaced manually");
    Ok(PoolResponse {
        count: draw.number_pool.len(),
        number_pool: draw.number_pool,
    })
}

/// Generate the pool from range and exclusion rules, persisting any rule
/// overrides carried by the request.
pub async fn generate_pool(
    state: &SharedState,
    request: GeneratePoolRequest,
) -> Result<GeneratePoolResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    state.session().read().await.ensure_not_rolling("regenerate the pool")?;

    let store = state.store();
    let mut config = store.load_config();
    let rules = &mut config.number_pool_config;

    if let Some(start) = request.start {
        rules.start = start;
    }
    if let Some(end) = request.end {
        rules.end = end;
    }
    match (request.exclude_contains, request.exclude_patterns) {
        (Some(contains), _) => rules.exclude_contains = contains,
        // Legacy key, honored only when the new one is absent.
        (None, Some(patterns)) => rules.exclude_contains = patterns,
        (None, None) => {}
    }
    if let Some(exact) = request.exclude_exact {
        rules.exclude_exact = exact;
    }
    rules.source = PoolSource::Auto;
    store.save_config(&config)?;

    let pool = generate_from_rules(&config.number_pool_config);
    let mut draw = store.load_draw_state();
    draw.number_pool = pool.clone();
    store.save_draw_state(&draw)?;

    info!(count = pool.len(), "pool generated from rules");
    Ok(GeneratePoolResponse {
        count: pool.len(),
        number_pool: pool,
        config: config.number_pool_config,
    })
}

/// Replace the pool with tokens parsed out of CSV-like bulk text.
pub async fn import_pool(
    state: &SharedState,
    request: ImportPoolRequest,
) -> Result<PoolResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    state.session().read().await.ensure_not_rolling("import the pool")?;

    let tokens: IndexSet<String> = request
        .csv
        .split(['\n', '\r', ','])
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && entry.bytes().all(|b| b.is_ascii_digit()))
        .map(pad_token)
        .collect();

    if tokens.is_empty() {
        return Err(ServiceError::InvalidInput("No valid numbers found".into()));
    }

    let store = state.store();
    let mut draw = store.load_draw_state();
    draw.number_pool = tokens.into_iter().collect();
    store.save_draw_state(&draw)?;

    info!(count = draw.number_pool.len(), "pool imported");
    Ok(PoolResponse {
        count: draw.number_pool.len(),
        number_pool: draw.number_pool,
    })
}

/// Generate the token list for a numeric range, applying both exclusion modes
/// against the unpadded digits.
pub fn generate_from_rules(rules: &NumberPoolConfig) -> Vec<String> {
    (rules.start..=rules.end)
        .map(|value| value.to_string())
        .filter(|digits| {
            !rules
                .exclude_contains
                .iter()
                .any(|pattern| digits.contains(pattern.as_str()))
        })
        .filter(|digits| !rules.exclude_exact.iter().any(|exact| exact == digits))
        .map(|digits| pad_token(&digits))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_exclusion_drops_every_match() {
        let rules = NumberPoolConfig {
            start: 1,
            end: 300,
            exclude_contains: vec!["4".into()],
            exclude_exact: Vec::new(),
            ..NumberPoolConfig::default()
        };
        let pool = generate_from_rules(&rules);
        assert!(pool.iter().all(|token| {
            let digits = token.trim_start_matches('0');
            !digits.contains('4')
        }));
        assert!(!pool.contains(&"004".to_string()));
        assert!(!pool.contains(&"140".to_string()));
        assert!(pool.contains(&"001".to_string()));
    }

    #[test]
    fn exact_exclusion_matches_unpadded_digits_only() {
        let rules = NumberPoolConfig {
            start: 1,
            end: 300,
            exclude_contains: Vec::new(),
            exclude_exact: vec!["13".into()],
            ..NumberPoolConfig::default()
        };
        let pool = generate_from_rules(&rules);
        assert!(!pool.contains(&"013".to_string()));
        assert!(pool.contains(&"113".to_string()));
        assert!(pool.contains(&"130".to_string()));
    }

    #[test]
    fn default_rules_exclude_four_and_thirteen() {
        let pool = generate_from_rules(&NumberPoolConfig::default());
        assert!(!pool.contains(&"004".to_string()));
        assert!(!pool.contains(&"013".to_string()));
        assert!(!pool.contains(&"113".to_string()));
        assert!(!pool.contains(&"130".to_string()));
        assert!(pool.contains(&"001".to_string()));
        assert!(pool.contains(&"300".to_string()));
    }

    #[test]
    fn tokens_are_zero_padded() {
        let rules = NumberPoolConfig {
            start: 7,
            end: 9,
            exclude_contains: Vec::new(),
            exclude_exact: Vec::new(),
            ..NumberPoolConfig::default()
        };
        assert_eq!(generate_from_rules(&rules), vec!["007", "008", "009"]);
    }
}
