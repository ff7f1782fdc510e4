//! Rounds and prizes CRUD, with ledger bookkeeping on catalog changes.

use tracing::info;

use crate::{
    dao::models::{Prize, Round},
    dto::{
        catalog::{
            PrizeCreateRequest, PrizeResponse, PrizeUpdateRequest, PrizeWithRound, PrizesResponse,
            RoundCreateRequest, RoundResponse, RoundUpdateRequest, RoundsResponse,
        },
        common::OkResponse,
    },
    error::ServiceError,
    services::ws_events,
    state::SharedState,
};

const DEFAULT_PRIZE_COLOR: &str = "#FFD700";

/// All rounds in display order.
pub async fn list_rounds(state: &SharedState) -> RoundsResponse {
    RoundsResponse {
        rounds: state.store().load_prizes().rounds,
    }
}

/// Create a round with a fresh identifier.
pub async fn create_round(
    state: &SharedState,
    request: RoundCreateRequest,
) -> Result<RoundResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let round = Round {
        id: book.next_round_id(),
        name: request.name,
        pool_type: request.pool_type.unwrap_or_default(),
        prizes: Vec::new(),
    };
    book.rounds.push(round.clone());
    store.save_prizes(&book)?;

    info!(round_id = round.id, "round created");
    Ok(RoundResponse { round })
}

/// Rename a round or switch its pool type.
pub async fn update_round(
    state: &SharedState,
    round_id: u32,
    request: RoundUpdateRequest,
) -> Result<RoundResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let round = book
        .rounds
        .iter_mut()
        .find(|round| round.id == round_id)
        .ok_or_else(|| ServiceError::NotFound("Round not found".into()))?;
    round.name = request.name;
    if let Some(pool_type) = request.pool_type {
        round.pool_type = pool_type;
    }
    let round = round.clone();
    store.save_prizes(&book)?;

    Ok(RoundResponse { round })
}

/// Delete a round, cascading ledger cleanup for every prize it contained.
pub async fn delete_round(
    state: &SharedState,
    round_id: u32,
) -> Result<OkResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let index = book
        .rounds
        .iter()
        .position(|round| round.id == round_id)
        .ok_or_else(|| ServiceError::NotFound("Round not found".into()))?;
    let removed = book.rounds.remove(index);
    store.save_prizes(&book)?;

    let mut draw = store.load_draw_state();
    for prize in &removed.prizes {
        unwind_prize_ledger(&mut draw, &prize.id);
    }
    store.save_draw_state(&draw)?;

    info!(round_id, prizes = removed.prizes.len(), "round deleted");
    Ok(OkResponse::ok())
}

/// List prizes, flat across all rounds or scoped to one round.
pub async fn list_prizes(
    state: &SharedState,
    round_id: Option<u32>,
) -> Result<PrizesResponse, ServiceError> {
    let book = state.store().load_prizes();

    match round_id {
        Some(round_id) => {
            let round = book
                .rounds
                .iter()
                .find(|round| round.id == round_id)
                .ok_or_else(|| ServiceError::NotFound("Round not found".into()))?;
            Ok(PrizesResponse::ForRound {
                prizes: round.prizes.clone(),
            })
        }
        None => Ok(PrizesResponse::All {
            prizes: book
                .rounds
                .iter()
                .flat_map(|round| {
                    round.prizes.iter().map(|prize| PrizeWithRound {
                        prize: prize.clone(),
                        round_id: round.id,
                        round_name: round.name.clone(),
                    })
                })
                .collect(),
        }),
    }
}

/// Create a prize inside a round and seed its remaining count.
pub async fn create_prize(
    state: &SharedState,
    request: PrizeCreateRequest,
) -> Result<PrizeResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let round = book
        .rounds
        .iter_mut()
        .find(|round| round.id == request.round_id)
        .ok_or_else(|| ServiceError::NotFound("Round not found".into()))?;

    let prize = Prize {
        id: next_prize_id(round),
        level: request.level,
        name: request.name,
        quantity: request.quantity,
        color: request.color.unwrap_or_else(|| DEFAULT_PRIZE_COLOR.into()),
        sponsor: request.sponsor.unwrap_or_default(),
        image: None,
    };
    round.prizes.push(prize.clone());
    store.save_prizes(&book)?;

    let mut draw = store.load_draw_state();
    draw.prize_remaining.insert(prize.id.clone(), prize.quantity);
    store.save_draw_state(&draw)?;

    info!(prize_id = %prize.id, "prize created");
    Ok(PrizeResponse { prize })
}

/// Apply a partial prize update and broadcast the resulting snapshot.
pub async fn update_prize(
    state: &SharedState,
    prize_id: &str,
    request: PrizeUpdateRequest,
) -> Result<PrizeResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let prize = book
        .rounds
        .iter_mut()
        .flat_map(|round| round.prizes.iter_mut())
        .find(|prize| prize.id == prize_id)
        .ok_or_else(|| ServiceError::NotFound("Prize not found".into()))?;

    if let Some(level) = request.level {
        prize.level = level;
    }
    if let Some(name) = request.name {
        prize.name = name;
    }
    if let Some(quantity) = request.quantity {
        prize.quantity = quantity;
    }
    if let Some(color) = request.color {
        prize.color = color;
    }
    if let Some(sponsor) = request.sponsor {
        prize.sponsor = sponsor;
    }
    if let Some(image) = request.image {
        prize.image = image.filter(|path| !path.is_empty());
    }
    let prize = prize.clone();
    store.save_prizes(&book)?;

    // A lowered quantity must not leave remaining above it.
    let mut draw = store.load_draw_state();
    if let Some(remaining) = draw.prize_remaining.get_mut(&prize.id)
        && *remaining > prize.quantity
    {
        *remaining = prize.quantity;
        store.save_draw_state(&draw)?;
    }

    ws_events::broadcast_state_update(state).await;
    Ok(PrizeResponse { prize })
}

/// Delete a prize and unwind its win status from the ledger.
pub async fn delete_prize(
    state: &SharedState,
    prize_id: &str,
) -> Result<OkResponse, ServiceError> {
    let _gate = state.lock_writes().await;
    let store = state.store();
    let mut book = store.load_prizes();

    let mut found = false;
    for round in &mut book.rounds {
        if let Some(index) = round.prizes.iter().position(|prize| prize.id == prize_id) {
            round.prizes.remove(index);
            found = true;
            break;
        }
    }
    if !found {
        return Err(ServiceError::NotFound("Prize not found".into()));
    }
    store.save_prizes(&book)?;

    let mut draw = store.load_draw_state();
    unwind_prize_ledger(&mut draw, prize_id);
    store.save_draw_state(&draw)?;

    ws_events::broadcast_state_update(state).await;
    info!(prize_id, "prize deleted");
    Ok(OkResponse::ok())
}

/// Drop a prize's ledger entries and remove its winners from the cross-prize
/// list.
fn unwind_prize_ledger(draw: &mut crate::dao::models::DrawState, prize_id: &str) {
    let removed = draw
        .winners_by_prize
        .shift_remove(prize_id)
        .map(|record| record.numbers)
        .unwrap_or_default();
    draw.prize_remaining.shift_remove(prize_id);
    if !removed.is_empty() {
        draw.all_winners.retain(|token| !removed.contains(token));
    }
}

/// Next `<roundId>-<seq>` identifier; sequences never shrink, so deleting a
/// prize cannot make a new one collide with an existing id.
fn next_prize_id(round: &Round) -> String {
    let max_seq = round
        .prizes
        .iter()
        .filter_map(|prize| prize.id.rsplit_once('-'))
        .filter_map(|(_, seq)| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", round.id, max_seq + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::PoolType;

    fn round_with_ids(ids: &[&str]) -> Round {
        Round {
            id: 1,
            name: "Opening".into(),
            pool_type: PoolType::Preset,
            prizes: ids
                .iter()
                .map(|id| Prize {
                    id: id.to_string(),
                    level: "Prize".into(),
                    name: "Item".into(),
                    quantity: 1,
                    color: DEFAULT_PRIZE_COLOR.into(),
                    sponsor: String::new(),
                    image: None,
                })
                .collect(),
        }
    }

    #[test]
    fn prize_ids_are_sequential_per_round() {
        assert_eq!(next_prize_id(&round_with_ids(&[])), "1-1");
        assert_eq!(next_prize_id(&round_with_ids(&["1-1", "1-2"])), "1-3");
    }

    #[test]
    fn prize_ids_skip_over_deleted_sequences() {
        // `1-2` was deleted; the next id must not collide with `1-3`.
        assert_eq!(next_prize_id(&round_with_ids(&["1-1", "1-3"])), "1-4");
    }
}
