//! Candidate resolution, the draw engine, and win-status resets.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::{
    dao::models::{
        Config, DrawState, LiveRoster, PoolType, PrizeBook, WinnerRecord, pad_token,
    },
    dto::draw::{DrawResponse, ResetResponse},
    error::ServiceError,
    services::ws_events,
    state::SharedState,
};

/// Outcome of a draw over the in-memory documents, before persistence.
#[derive(Debug)]
pub struct DrawReport {
    /// Winning tokens in final display order.
    pub winners: Vec<String>,
    /// Whether the calibration map changed and the config must be saved.
    pub config_changed: bool,
    /// Whether winners were removed from the live roster.
    pub roster_changed: bool,
}

/// Compute the eligible candidate set for a draw attempt on `prize_id`.
///
/// Candidates come from the owning round's pool. Tokens already in the
/// prize's own winner list are always excluded; with repeat wins disabled,
/// every past winner is excluded as well.
pub fn resolve_candidates(
    book: &PrizeBook,
    draw: &DrawState,
    config: &Config,
    roster: &LiveRoster,
    prize_id: &str,
) -> Result<Vec<String>, ServiceError> {
    let (round, _prize) = book
        .find_prize(prize_id)
        .ok_or_else(|| ServiceError::NotFound("Prize not found".into()))?;

    let source: &[String] = match round.pool_type {
        PoolType::Live => &roster.registrations,
        PoolType::Preset => &draw.number_pool,
    };

    let own_winners = draw
        .winners_by_prize
        .get(prize_id)
        .map(|record| record.numbers.as_slice())
        .unwrap_or_default();

    let candidates = source
        .iter()
        .filter(|token| !own_winners.contains(token))
        .filter(|token| config.allow_repeat_win || !draw.all_winners.contains(token))
        .cloned()
        .collect();

    Ok(candidates)
}

/// Select winners for `prize_id` and apply every resulting mutation to the
/// in-memory documents.
///
/// The caller persists the documents afterwards, roster and config first and
/// the draw ledger last, all inside one write-gate critical section.
pub fn execute_draw(
    book: &PrizeBook,
    draw: &mut DrawState,
    config: &mut Config,
    roster: &mut LiveRoster,
    prize_id: &str,
    requested: u32,
    rng: &mut impl Rng,
) -> Result<DrawReport, ServiceError> {
    let (round, prize) = book
        .find_prize(prize_id)
        .ok_or_else(|| ServiceError::NotFound("Prize not found".into()))?;
    let is_live = round.pool_type == PoolType::Live;

    let remaining = draw.prize_remaining.get(prize_id).copied().unwrap_or(0);
    let mut candidates = resolve_candidates(book, draw, config, roster, prize_id)?;

    let actual = (requested as usize).min(remaining as usize).min(candidates.len());
    if actual == 0 {
        let reason = if remaining == 0 {
            "No numbers available: prize quota reached"
        } else {
            "No numbers available: pool is empty"
        };
        return Err(ServiceError::InvalidState(reason.into()));
    }

    let mut winners: Vec<String> = Vec::with_capacity(actual);
    let mut consumed: Vec<String> = Vec::new();

    // Forced picks first, matched exactly or against the zero-padded pool form.
    for token in config.calibration_for(prize_id).to_vec() {
        if winners.len() >= actual {
            break;
        }
        let position = candidates
            .iter()
            .position(|candidate| *candidate == token)
            .or_else(|| {
                let padded = pad_token(&token);
                candidates.iter().position(|candidate| *candidate == padded)
            });
        match position {
            Some(index) => {
                winners.push(candidates.remove(index));
                consumed.push(token);
            }
            None => debug!(prize_id, token, "forced pick not in the candidate pool"),
        }
    }

    // Remaining slots are drawn uniformly without replacement.
    while winners.len() < actual {
        let index = rng.random_range(0..candidates.len());
        winners.push(candidates.remove(index));
    }

    // Uniform shuffle so forced picks are not distinguishable by position.
    winners.shuffle(rng);

    let config_changed = consume_calibration(config, prize_id, &consumed);

    let mut roster_changed = false;
    if is_live {
        roster.registrations.retain(|token| !winners.contains(token));
        roster_changed = true;
    } else if !config.allow_repeat_win {
        draw.number_pool.retain(|token| !winners.contains(token));
    }

    let record = draw
        .winners_by_prize
        .entry(prize_id.to_string())
        .or_insert_with(|| WinnerRecord {
            level: prize.level.clone(),
            name: prize.name.clone(),
            numbers: Vec::new(),
        });
    record.numbers.extend(winners.iter().cloned());
    draw.all_winners.extend(winners.iter().cloned());
    draw.prize_remaining
        .insert(prize_id.to_string(), remaining - actual as u32);

    info!(prize_id, count = winners.len(), "draw completed");

    Ok(DrawReport {
        winners,
        config_changed,
        roster_changed,
    })
}

/// Remove consumed forced picks, deleting entries and the whole map as they
/// empty so fully used calibration leaves no residue.
fn consume_calibration(config: &mut Config, prize_id: &str, consumed: &[String]) -> bool {
    if consumed.is_empty() {
        return false;
    }
    if let Some(map) = config.calibration.as_mut() {
        if let Some(list) = map.get_mut(prize_id) {
            list.retain(|token| !consumed.contains(token));
            if list.is_empty() {
                map.shift_remove(prize_id);
            }
        }
        if map.is_empty() {
            config.calibration = None;
        }
    }
    true
}

/// Restore one prize's win status: remaining back to its quantity, its winner
/// ledger deleted, and its winners removed from the cross-prize ledger.
///
/// Pool contents are never restored by a reset.
pub fn reset_prize(
    book: &PrizeBook,
    draw: &mut DrawState,
    prize_id: &str,
) -> Result<(), ServiceError> {
    let (_round, prize) = book
        .find_prize(prize_id)
        .ok_or_else(|| ServiceError::NotFound("Prize not found".into()))?;

    let removed = draw
        .winners_by_prize
        .shift_remove(prize_id)
        .map(|record| record.numbers)
        .unwrap_or_default();
    draw.all_winners.retain(|token| !removed.contains(token));
    draw.prize_remaining
        .insert(prize_id.to_string(), prize.quantity);

    Ok(())
}

/// Restore every prize's win status, keeping the pool untouched.
pub fn reset_all(book: &PrizeBook, draw: &mut DrawState) {
    draw.prize_remaining = book.initial_remaining();
    draw.winners_by_prize.clear();
    draw.all_winners.clear();
}

/// Direct draw: run the engine and persist, bypassing the display session.
pub async fn draw(
    state: &SharedState,
    prize_id: &str,
    count: u32,
) -> Result<DrawResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    draw_locked(state, prize_id, count)
}

/// Draw while the caller already holds the write gate.
pub(crate) fn draw_locked(
    state: &SharedState,
    prize_id: &str,
    count: u32,
) -> Result<DrawResponse, ServiceError> {
    let store = state.store();
    let book = store.load_prizes();
    let mut draw = store.load_draw_state();
    let mut config = store.load_config();
    let mut roster = store.load_roster();

    let mut rng = rand::rng();
    let report = execute_draw(
        &book,
        &mut draw,
        &mut config,
        &mut roster,
        prize_id,
        count,
        &mut rng,
    )?;

    if report.roster_changed {
        store.save_roster(&roster)?;
    }
    if report.config_changed {
        store.save_config(&config)?;
    }
    store.save_draw_state(&draw)?;

    Ok(DrawResponse {
        winners: report.winners,
        number_pool: draw.number_pool,
        prize_remaining: draw.prize_remaining,
        winners_by_prize: draw.winners_by_prize,
    })
}

/// Reset win status for one prize or for everything, then notify displays.
///
/// Rejected while a roll is in progress.
pub async fn reset(
    state: &SharedState,
    prize_id: Option<String>,
) -> Result<ResetResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    state.session().read().await.ensure_not_rolling("reset")?;

    let store = state.store();
    let book = store.load_prizes();
    let mut draw = store.load_draw_state();

    let response = match prize_id {
        Some(prize_id) => {
            reset_prize(&book, &mut draw, &prize_id)?;
            store.save_draw_state(&draw)?;
            ResetResponse {
                state: draw,
                reset_prize_id: Some(prize_id),
                total_numbers: None,
            }
        }
        None => {
            reset_all(&book, &mut draw);
            store.save_draw_state(&draw)?;
            ws_events::broadcast_reset(state);
            let total = draw.number_pool.len();
            ResetResponse {
                state: draw,
                reset_prize_id: None,
                total_numbers: Some(total),
            }
        }
    };

    ws_events::broadcast_state_update(state).await;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::{Prize, Round};
    use indexmap::IndexMap;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn book(pool_type: PoolType, quantity: u32) -> PrizeBook {
        PrizeBook {
            rounds: vec![Round {
                id: 1,
                name: "Opening".into(),
                pool_type,
                prizes: vec![Prize {
                    id: "1-1".into(),
                    level: "First Prize".into(),
                    name: "Laptop".into(),
                    quantity,
                    color: "#FFD700".into(),
                    sponsor: String::new(),
                    image: None,
                }],
            }],
        }
    }

    fn draw_state(pool: &[&str], remaining: u32) -> DrawState {
        let mut state = DrawState {
            number_pool: pool.iter().map(|s| s.to_string()).collect(),
            ..DrawState::default()
        };
        state.prize_remaining.insert("1-1".into(), remaining);
        state
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn preset_draw_takes_two_and_exhausts_the_quota() {
        let book = book(PoolType::Preset, 2);
        let mut draw = draw_state(&["001", "002", "003"], 2);
        let mut config = Config::default();
        let mut roster = LiveRoster::default();

        let report = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 2, &mut rng(),
        )
        .unwrap();

        assert_eq!(report.winners.len(), 2);
        assert_eq!(draw.prize_remaining["1-1"], 0);
        assert_eq!(draw.number_pool.len(), 1);
        for winner in &report.winners {
            assert!(!draw.number_pool.contains(winner));
            assert!(draw.all_winners.contains(winner));
        }
        assert_eq!(draw.winners_by_prize["1-1"].numbers, report.winners);

        let err = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(ref msg) if msg.contains("quota")));
    }

    #[test]
    fn draw_is_bounded_by_the_candidate_count() {
        let book = book(PoolType::Preset, 10);
        let mut draw = draw_state(&["001", "002"], 10);
        let mut config = Config::default();
        let mut roster = LiveRoster::default();

        let report = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 5, &mut rng(),
        )
        .unwrap();

        assert_eq!(report.winners.len(), 2);
        assert_eq!(draw.prize_remaining["1-1"], 8);
        assert!(draw.number_pool.is_empty());
    }

    #[test]
    fn live_draw_removes_winners_from_the_roster() {
        let book = book(PoolType::Live, 5);
        let mut draw = DrawState::default();
        draw.prize_remaining.insert("1-1".into(), 5);
        let mut config = Config::default();
        let mut roster = LiveRoster {
            is_open: true,
            registrations: vec!["A1".into(), "B2".into()],
            cleared_at: 0,
        };

        let report = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 5, &mut rng(),
        )
        .unwrap();

        assert_eq!(report.winners.len(), 2);
        assert!(report.roster_changed);
        assert!(roster.registrations.is_empty());
    }

    #[test]
    fn calibration_is_consumed_without_residue() {
        let book = book(PoolType::Preset, 3);
        let mut draw = draw_state(&["001", "007", "013"], 3);
        let mut config = Config::default();
        let mut calibration = IndexMap::new();
        calibration.insert("1-1".to_string(), vec!["7".to_string()]);
        config.calibration = Some(calibration);
        let mut roster = LiveRoster::default();

        let report = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap();

        assert_eq!(report.winners, vec!["007".to_string()]);
        assert!(report.config_changed);
        assert!(config.calibration.is_none());
    }

    #[test]
    fn unmatched_calibration_degrades_to_random() {
        let book = book(PoolType::Preset, 1);
        let mut draw = draw_state(&["001", "002"], 1);
        let mut config = Config::default();
        let mut calibration = IndexMap::new();
        calibration.insert("1-1".to_string(), vec!["999".to_string()]);
        config.calibration = Some(calibration);
        let mut roster = LiveRoster::default();

        let report = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap();

        assert_eq!(report.winners.len(), 1);
        assert!(!report.config_changed);
        assert!(config.calibration.is_some());
    }

    #[test]
    fn repeat_wins_keep_the_preset_pool_intact() {
        let mut book = book(PoolType::Preset, 1);
        book.rounds[0].prizes.push(Prize {
            id: "1-2".into(),
            level: "Second Prize".into(),
            name: "Phone".into(),
            quantity: 1,
            color: "#FFD700".into(),
            sponsor: String::new(),
            image: None,
        });
        let mut draw = draw_state(&["001"], 1);
        draw.prize_remaining.insert("1-2".into(), 1);
        let mut config = Config {
            allow_repeat_win: true,
            ..Config::default()
        };
        let mut roster = LiveRoster::default();

        let first = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap();
        assert_eq!(first.winners, vec!["001".to_string()]);
        assert_eq!(draw.number_pool, vec!["001".to_string()]);

        // Same token may win under another prize.
        let second = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-2", 1, &mut rng(),
        )
        .unwrap();
        assert_eq!(second.winners, vec!["001".to_string()]);

        // But never twice under the same prize.
        draw.prize_remaining.insert("1-1".into(), 1);
        let err = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidState(_)));
    }

    #[test]
    fn cross_prize_exclusion_applies_without_repeat_wins() {
        let mut book = book(PoolType::Preset, 1);
        book.rounds[0].prizes.push(Prize {
            id: "1-2".into(),
            level: "Second Prize".into(),
            name: "Phone".into(),
            quantity: 1,
            color: "#FFD700".into(),
            sponsor: String::new(),
            image: None,
        });
        let mut draw = draw_state(&["001", "002"], 1);
        draw.prize_remaining.insert("1-2".into(), 1);
        let mut config = Config::default();
        let mut roster = LiveRoster::default();

        let first = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-1", 1, &mut rng(),
        )
        .unwrap();
        let second = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "1-2", 1, &mut rng(),
        )
        .unwrap();
        assert_ne!(first.winners, second.winners);
    }

    #[test]
    fn unknown_prize_is_not_found() {
        let book = book(PoolType::Preset, 1);
        let mut draw = draw_state(&["001"], 1);
        let mut config = Config::default();
        let mut roster = LiveRoster::default();
        let err = execute_draw(
            &book, &mut draw, &mut config, &mut roster, "9-9", 1, &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn reset_prize_is_idempotent() {
        let book = book(PoolType::Preset, 2);
        let mut draw = draw_state(&["003"], 0);
        draw.winners_by_prize.insert(
            "1-1".into(),
            WinnerRecord {
                level: "First Prize".into(),
                name: "Laptop".into(),
                numbers: vec!["001".into(), "002".into()],
            },
        );
        draw.all_winners = vec!["001".into(), "002".into()];

        reset_prize(&book, &mut draw, "1-1").unwrap();
        let once = draw.clone();
        reset_prize(&book, &mut draw, "1-1").unwrap();

        assert_eq!(draw, once);
        assert_eq!(draw.prize_remaining["1-1"], 2);
        assert!(draw.winners_by_prize.is_empty());
        assert!(draw.all_winners.is_empty());
        // The pool is never restored by a reset.
        assert_eq!(draw.number_pool, vec!["003".to_string()]);
    }

    #[test]
    fn full_reset_clears_every_ledger_but_not_the_pool() {
        let book = book(PoolType::Preset, 2);
        let mut draw = draw_state(&["003"], 0);
        draw.winners_by_prize.insert(
            "1-1".into(),
            WinnerRecord {
                level: "First Prize".into(),
                name: "Laptop".into(),
                numbers: vec!["001".into()],
            },
        );
        draw.all_winners = vec!["001".into()];

        reset_all(&book, &mut draw);

        assert_eq!(draw.prize_remaining["1-1"], 2);
        assert!(draw.winners_by_prize.is_empty());
        assert!(draw.all_winners.is_empty());
        assert_eq!(draw.number_pool, vec!["003".to_string()]);
    }
}
