//! Gaming lounge tournaments: library with models and the bracket engine.

pub mod logic;
pub mod models;

pub use logic::{
    apply_result, cancel_match, derive_status, generate_fixtures, has_downstream_dependents,
    reassign_match_players, record_result, rename_player, reschedule_match, resolve_winner,
    ResultUpdate,
};
pub use models::{
    find_match, find_player, EngineError, Format, GameMatch, MatchId, MatchStatus, Player,
    PlayerId, Slot, Stage, Tournament, TournamentId, TournamentStatus,
};
