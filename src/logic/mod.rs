//! Tournament engine: pairing, bracket building, result propagation, winners and edits.
//!
//! Every operation takes the current players/matches by slice and returns new vectors. On
//! error the caller's data is left as it was.

pub mod bracket;
mod editing;
mod fixtures;
pub mod pairing;
mod progression;
mod winner;

pub use editing::{has_downstream_dependents, reassign_match_players, rename_player};
pub use fixtures::generate_fixtures;
pub use progression::{apply_result, cancel_match, record_result, reschedule_match, ResultUpdate};
pub use winner::{derive_status, resolve_winner};
