//! Bracket graph builder: turns pairings into numbered, linked matches.
//!
//! Matches live in a flat list and refer to each other by [`MatchId`], never by ownership.
//! Ids are assigned in generation order starting at 1, so the same roster always yields the
//! same graph.

use crate::logic::pairing::Pairing;
use crate::models::{find_match, GameMatch, MatchId, Slot, Stage};

/// Number of knockout rounds for `players` entrants: ceil(log2(players)).
pub fn knockout_round_count(players: usize) -> u32 {
    if players <= 1 {
        return 0;
    }
    usize::BITS - (players - 1).leading_zeros()
}

/// Build the full knockout bracket from its first-round pairings.
///
/// Later rounds are filled from an ordered pool of feeder matches: feeders `2k-1` and `2k`
/// both point to match `k` of the next round. When the pool is odd (rosters that are even
/// but not a power of two) the last feeder is carried to the front of the next round's
/// pool, so every later match still has exactly two feeders.
pub fn build_knockout(first_round: &[Pairing]) -> Vec<GameMatch> {
    let total_rounds = knockout_round_count(first_round.len() * 2);
    let mut matches: Vec<GameMatch> = Vec::with_capacity(first_round.len() * 2);
    let mut next_id = 1u32;

    let mut pool: Vec<usize> = Vec::with_capacity(first_round.len());
    for &(p1, p2) in first_round {
        pool.push(matches.len());
        matches.push(GameMatch::new(
            MatchId(next_id),
            1,
            Stage::for_round(1, total_rounds),
            Some(p1),
            Some(p2),
        ));
        next_id += 1;
    }

    let mut round = 1;
    while pool.len() > 1 {
        round += 1;
        let carried = if pool.len() % 2 == 1 { pool.pop() } else { None };
        let mut next_pool: Vec<usize> = Vec::with_capacity(pool.len() / 2 + 1);
        next_pool.extend(carried);
        for feeders in pool.chunks_exact(2) {
            let id = MatchId(next_id);
            next_id += 1;
            for &feeder in feeders {
                matches[feeder].next_match_id = Some(id);
            }
            next_pool.push(matches.len());
            matches.push(GameMatch::new(
                id,
                round,
                Stage::for_round(round, total_rounds),
                None,
                None,
            ));
        }
        pool = next_pool;
    }

    log::debug!(
        "Built knockout bracket: {} matches over {} rounds",
        matches.len(),
        total_rounds
    );
    matches
}

/// Lay out league rounds as unlinked matches.
pub fn build_league(rounds: &[Vec<Pairing>]) -> Vec<GameMatch> {
    let mut matches = Vec::new();
    let mut next_id = 1u32;
    for (round, pairings) in (1u32..).zip(rounds) {
        for &(p1, p2) in pairings {
            matches.push(GameMatch::new(
                MatchId(next_id),
                round,
                Stage::RoundMatch,
                Some(p1),
                Some(p2),
            ));
            next_id += 1;
        }
    }
    matches
}

/// Matches whose winners feed `id`, ordered by id.
pub fn predecessors(matches: &[GameMatch], id: MatchId) -> Vec<&GameMatch> {
    let mut feeders: Vec<&GameMatch> = matches
        .iter()
        .filter(|m| m.next_match_id == Some(id))
        .collect();
    feeders.sort_by_key(|m| m.id);
    feeders
}

/// Slot of the successor that the winner of `feeder` belongs in: the lower-id feeder takes
/// slot 1, the other slot 2.
pub fn feeder_slot(matches: &[GameMatch], feeder: &GameMatch) -> Option<Slot> {
    let successor = feeder.next_match_id?;
    let position = predecessors(matches, successor)
        .iter()
        .position(|m| m.id == feeder.id)?;
    match position {
        0 => Some(Slot::One),
        1 => Some(Slot::Two),
        _ => None,
    }
}

/// Every match reachable from `id` by following `next_match_id` links (excluding `id`).
pub fn descendants(matches: &[GameMatch], id: MatchId) -> Vec<&GameMatch> {
    let mut chain = Vec::new();
    let mut current = find_match(matches, id).and_then(|m| m.next_match_id);
    while let Some(next) = current {
        // A well-formed bracket is acyclic; the length guard keeps a corrupt one finite.
        if chain.len() >= matches.len() {
            break;
        }
        match find_match(matches, next) {
            Some(m) => {
                chain.push(m);
                current = m.next_match_id;
            }
            None => break,
        }
    }
    chain
}
