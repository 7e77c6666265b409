//! Mid-tournament edits: renaming players and reassigning match competitors.

use crate::logic::bracket::descendants;
use crate::logic::fixtures::generate_fixtures;
use crate::models::{
    find_match, find_player, match_index, EngineError, Format, GameMatch, MatchId, Player,
    PlayerId,
};

/// Rename a player. Matches refer to players by id, so they are left untouched.
pub fn rename_player(
    players: &[Player],
    player_id: PlayerId,
    new_name: &str,
) -> Result<Vec<Player>, EngineError> {
    let name = new_name.trim();
    if name.is_empty() {
        return Err(EngineError::EmptyPlayerName);
    }
    let idx = players
        .iter()
        .position(|p| p.id == player_id)
        .ok_or(EngineError::PlayerNotFound(player_id))?;
    if players.iter().any(|p| p.id != player_id && p.has_name(name)) {
        return Err(EngineError::DuplicatePlayerName);
    }
    let mut players = players.to_vec();
    players[idx].name = name.to_string();
    Ok(players)
}

/// True when a later match on this match's path to the final has already been played.
pub fn has_downstream_dependents(matches: &[GameMatch], match_id: MatchId) -> bool {
    descendants(matches, match_id).iter().any(|m| m.completed)
}

/// Replace the two competitors of a match.
///
/// Same players as before: nothing changes. Otherwise the match's result is dropped. If a
/// later match on its path has been played, the whole bracket is regenerated from `players`
/// and the new pairing is applied to the regenerated match with the same id; every other
/// recorded result is lost. Advisory schedules survive regeneration. Without such a match
/// only the edited match changes; a winner it already advanced stays in the successor.
pub fn reassign_match_players(
    players: &[Player],
    matches: &[GameMatch],
    match_id: MatchId,
    player1_id: PlayerId,
    player2_id: PlayerId,
) -> Result<Vec<GameMatch>, EngineError> {
    let game = find_match(matches, match_id).ok_or(EngineError::MatchNotFound(match_id))?;
    if game.is_cancelled() {
        return Err(EngineError::MatchAlreadyCancelled(match_id));
    }
    if game.player1_id == Some(player1_id) && game.player2_id == Some(player2_id) {
        return Ok(matches.to_vec());
    }
    if player1_id == player2_id {
        return Err(EngineError::DuplicateMatchPlayer);
    }
    for id in [player1_id, player2_id] {
        if find_player(players, id).is_none() {
            return Err(EngineError::PlayerNotFound(id));
        }
    }

    let mut updated = if has_downstream_dependents(matches, match_id) {
        log::info!("Match {match_id} has completed matches downstream; regenerating the bracket");
        let mut regenerated = generate_fixtures(players, Format::Knockout)?;
        for fresh in &mut regenerated {
            if let Some(old) = find_match(matches, fresh.id) {
                fresh.scheduled_date = old.scheduled_date;
                fresh.scheduled_time = old.scheduled_time;
            }
        }
        regenerated
    } else {
        matches.to_vec()
    };

    let idx = match_index(&updated, match_id).ok_or(EngineError::MatchNotFound(match_id))?;
    let target = &mut updated[idx];
    target.player1_id = Some(player1_id);
    target.player2_id = Some(player2_id);
    target.clear_result();
    Ok(updated)
}
