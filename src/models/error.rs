//! Errors returned by engine operations.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use thiserror::Error;

/// Errors that can occur during tournament operations.
///
/// Validation errors are always returned to the caller; nothing is corrected silently.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EngineError {
    /// Fewer than 2 players.
    #[error("Need at least 2 players to generate fixtures")]
    InsufficientPlayers,

    /// Knockout brackets need an even roster (no byes).
    #[error("Knockout needs an even number of players (got {0})")]
    OddPlayerCount(usize),

    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    /// Winner is not one of the match's two players.
    #[error("Winner is not a player in match {0}")]
    InvalidWinner(MatchId),

    #[error("Match {0} has been cancelled")]
    MatchAlreadyCancelled(MatchId),

    #[error("Match {0} is already completed")]
    MatchAlreadyCompleted(MatchId),

    /// A slot is still waiting for a previous round's winner.
    #[error("Match {0} does not have both players yet")]
    MatchNotReady(MatchId),

    /// A player with this name already exists (names are unique, case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayerName,

    #[error("Player name cannot be empty")]
    EmptyPlayerName,

    #[error("Player not found")]
    PlayerNotFound(PlayerId),

    #[error("Player id appears more than once in the roster")]
    DuplicatePlayerId(PlayerId),

    /// Both slots of a match were given the same player.
    #[error("A player cannot face themselves")]
    DuplicateMatchPlayer,

    /// Roster or format changes are closed once fixtures exist.
    #[error("Fixtures have already been generated")]
    FixturesAlreadyGenerated,

    /// A successor match has no free slot for a propagated winner. Indicates a
    /// broken bracket graph, never a user mistake.
    #[error("Bracket is inconsistent: match {successor} has no free slot for the winner of match {feeder}")]
    StructuralInconsistency { feeder: MatchId, successor: MatchId },
}
