//! Data structures for a tournament: players, matches, tournament record.

mod error;
mod game;
mod player;
mod tournament;

pub use error::EngineError;
pub(crate) use game::match_index;
pub use game::{find_match, GameMatch, MatchId, MatchStatus, Slot, Stage};
pub use player::{find_player, Player, PlayerId};
pub use tournament::{Format, Tournament, TournamentId, TournamentStatus};
