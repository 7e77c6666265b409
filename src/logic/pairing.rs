//! Pairing generators: who meets whom, before any bracket structure exists.

use crate::models::{EngineError, Player, PlayerId};

/// A first-round pairing (slot 1, slot 2).
pub type Pairing = (PlayerId, PlayerId);

/// Round 1 of a knockout bracket: players paired consecutively in roster order (1v2, 3v4, ...).
///
/// Not seeded by rank. Requires an even roster of at least 2.
pub fn knockout_pairings(players: &[Player]) -> Result<Vec<Pairing>, EngineError> {
    if players.len() < 2 {
        return Err(EngineError::InsufficientPlayers);
    }
    if players.len() % 2 != 0 {
        return Err(EngineError::OddPlayerCount(players.len()));
    }
    Ok(players
        .chunks_exact(2)
        .map(|pair| (pair[0].id, pair[1].id))
        .collect())
}

/// League schedule: every unordered pair exactly once, grouped into rounds with the circle method.
///
/// Odd rosters get a phantom entry; whoever draws it rests that round. Within a round no
/// player appears twice.
pub fn round_robin_pairings(players: &[Player]) -> Result<Vec<Vec<Pairing>>, EngineError> {
    if players.len() < 2 {
        return Err(EngineError::InsufficientPlayers);
    }
    let mut seats: Vec<Option<PlayerId>> = players.iter().map(|p| Some(p.id)).collect();
    if seats.len() % 2 != 0 {
        seats.push(None);
    }
    let n = seats.len();

    let mut rounds = Vec::with_capacity(n - 1);
    for _ in 0..n - 1 {
        let round: Vec<Pairing> = (0..n / 2)
            .filter_map(|i| match (seats[i], seats[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect();
        rounds.push(round);
        // Seat 0 stays put, everyone else moves one seat clockwise.
        seats[1..].rotate_right(1);
    }
    Ok(rounds)
}
