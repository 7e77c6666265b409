//! Fixture generation entry point: roster + format -> initial match list.

use crate::logic::bracket::{build_knockout, build_league};
use crate::logic::pairing::{knockout_pairings, round_robin_pairings};
use crate::models::{EngineError, Format, GameMatch, Player};

/// Generate the initial match list for `players` in the given format.
///
/// Calling this again on a tournament that already has results is allowed and yields the
/// same structure, but every recorded result is lost. Refusing to regenerate a completed
/// tournament is up to the caller.
pub fn generate_fixtures(players: &[Player], format: Format) -> Result<Vec<GameMatch>, EngineError> {
    let matches = match format {
        Format::Knockout => build_knockout(&knockout_pairings(players)?),
        Format::League => build_league(&round_robin_pairings(players)?),
    };
    log::debug!(
        "Generated {} {:?} fixtures for {} players",
        matches.len(),
        format,
        players.len()
    );
    Ok(matches)
}
