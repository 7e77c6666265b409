//! Winner resolution and derived tournament status.

use crate::models::{find_player, GameMatch, Player, PlayerId, Stage, TournamentStatus};

/// Champion and runner-up of a knockout bracket, read off the completed final.
///
/// League fixtures never carry a `Final` stage, so a league always resolves to
/// `(None, None)`. An id that no longer matches a roster entry resolves to `None`.
pub fn resolve_winner(matches: &[GameMatch], players: &[Player]) -> (Option<Player>, Option<Player>) {
    let mut finals = matches
        .iter()
        .filter(|m| m.stage == Stage::Final && m.completed);
    let Some(final_match) = finals.next() else {
        return (None, None);
    };
    if finals.next().is_some() {
        log::warn!("More than one completed final; using match {}", final_match.id);
    }

    let champion = lookup(players, final_match.winner_id);
    let runner_up = lookup(players, final_match.loser_id());
    (champion, runner_up)
}

fn lookup(players: &[Player], id: Option<PlayerId>) -> Option<Player> {
    let id = id?;
    let player = find_player(players, id).cloned();
    if player.is_none() {
        log::warn!("Final references player {id} who is not on the roster");
    }
    player
}

/// `Completed` once there is a champion, `InProgress` once fixtures exist, else `Upcoming`.
pub fn derive_status(matches: &[GameMatch], winner: Option<&Player>) -> TournamentStatus {
    if winner.is_some() {
        TournamentStatus::Completed
    } else if !matches.is_empty() {
        TournamentStatus::InProgress
    } else {
        TournamentStatus::Upcoming
    }
}
