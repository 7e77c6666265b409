//! Result propagation: recording winners and moving them through the bracket.

use crate::logic::bracket::feeder_slot;
use crate::models::{match_index, EngineError, GameMatch, MatchId, MatchStatus, PlayerId, Slot};
use chrono::{NaiveDate, NaiveTime};

/// Outcome of recording a result: the updated matches, plus a bracket fault if the winner
/// could not be advanced. The direct update to the played match is kept either way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultUpdate {
    pub matches: Vec<GameMatch>,
    pub fault: Option<EngineError>,
}

/// Record `winner_id` as the winner of `match_id` and advance them to the successor match.
///
/// The winner fills the slot the bracket reserves for this feeder (slot 1 for the lower-id
/// feeder, slot 2 otherwise), falling back to the first empty slot. Recording the same
/// winner twice changes nothing. Recording a different winner on a completed match replaces
/// the old winner downstream and invalidates any later result that depended on them.
///
/// A successor with no free slot is logged and otherwise ignored; use [`apply_result`] to
/// see the fault.
pub fn record_result(
    matches: &[GameMatch],
    match_id: MatchId,
    winner_id: PlayerId,
) -> Result<Vec<GameMatch>, EngineError> {
    apply_result(matches, match_id, winner_id).map(|update| update.matches)
}

/// Same as [`record_result`], but reports a propagation fault alongside the updated matches.
pub fn apply_result(
    matches: &[GameMatch],
    match_id: MatchId,
    winner_id: PlayerId,
) -> Result<ResultUpdate, EngineError> {
    let mut matches = matches.to_vec();
    let idx = match_index(&matches, match_id).ok_or(EngineError::MatchNotFound(match_id))?;

    let game = &matches[idx];
    if game.is_cancelled() {
        return Err(EngineError::MatchAlreadyCancelled(match_id));
    }
    if !game.is_ready() {
        return Err(EngineError::MatchNotReady(match_id));
    }
    if !game.has_player(winner_id) {
        return Err(EngineError::InvalidWinner(match_id));
    }

    let previous = if game.completed { game.winner_id } else { None };
    if previous != Some(winner_id) {
        matches[idx].set_winner(winner_id);
        if let Some(previous) = previous {
            log::info!("Match {match_id}: result corrected, retracting previous winner downstream");
            retract_winner(&mut matches, idx, previous);
        }
    }
    let fault = propagate_winner(&mut matches, idx).err();
    Ok(ResultUpdate { matches, fault })
}

/// Put the winner of `matches[idx]` into its successor, if it has one.
fn propagate_winner(matches: &mut [GameMatch], idx: usize) -> Result<(), EngineError> {
    let feeder = &matches[idx];
    let (Some(next), Some(winner)) = (feeder.next_match_id, feeder.winner_id) else {
        return Ok(());
    };
    let feeder_id = feeder.id;
    let designated = feeder_slot(matches, feeder);

    let Some(succ_idx) = match_index(matches, next) else {
        log::error!("Match {feeder_id} links to missing match {next}");
        return Err(EngineError::StructuralInconsistency {
            feeder: feeder_id,
            successor: next,
        });
    };
    let successor = &mut matches[succ_idx];
    if successor.has_player(winner) {
        return Ok(());
    }

    let slot = designated
        .filter(|&s| successor.slot(s).is_none())
        .or_else(|| [Slot::One, Slot::Two].into_iter().find(|&s| successor.slot(s).is_none()));
    match slot {
        Some(slot) => {
            *successor.slot_mut(slot) = Some(winner);
            log::debug!("Advanced winner of match {feeder_id} to match {next} ({slot:?})");
            Ok(())
        }
        None => {
            log::error!("Match {next} already has two players; cannot advance winner of match {feeder_id}");
            Err(EngineError::StructuralInconsistency {
                feeder: feeder_id,
                successor: next,
            })
        }
    }
}

/// Remove `previous` (a retracted winner of `matches[idx]`) from the successor. If the
/// successor had a result, it no longer stands, so its own winner is retracted in turn.
fn retract_winner(matches: &mut [GameMatch], idx: usize, previous: PlayerId) {
    let Some(next) = matches[idx].next_match_id else {
        return;
    };
    let Some(succ_idx) = match_index(matches, next) else {
        return;
    };
    let successor = &mut matches[succ_idx];
    let Some(slot) = successor.slot_of(previous) else {
        return;
    };
    *successor.slot_mut(slot) = None;
    if successor.completed {
        let stale = successor.winner_id;
        successor.clear_result();
        if let Some(stale) = stale {
            retract_winner(matches, succ_idx, stale);
        }
    }
}

/// Cancel a match that has not been played. Cancelling twice is a no-op.
pub fn cancel_match(matches: &[GameMatch], match_id: MatchId) -> Result<Vec<GameMatch>, EngineError> {
    let mut matches = matches.to_vec();
    let idx = match_index(&matches, match_id).ok_or(EngineError::MatchNotFound(match_id))?;
    let game = &mut matches[idx];
    if game.completed {
        return Err(EngineError::MatchAlreadyCompleted(match_id));
    }
    game.status = MatchStatus::Cancelled;
    Ok(matches)
}

/// Update the advisory date/time of a match. Does not affect the bracket.
pub fn reschedule_match(
    matches: &[GameMatch],
    match_id: MatchId,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Result<Vec<GameMatch>, EngineError> {
    let mut matches = matches.to_vec();
    let idx = match_index(&matches, match_id).ok_or(EngineError::MatchNotFound(match_id))?;
    let game = &mut matches[idx];
    if game.is_cancelled() {
        return Err(EngineError::MatchAlreadyCancelled(match_id));
    }
    game.scheduled_date = date;
    game.scheduled_time = time;
    Ok(matches)
}
