//! Tournament record, Format and TournamentStatus.

use crate::logic;
use crate::models::error::EngineError;
use crate::models::game::{GameMatch, MatchId};
use crate::models::player::{find_player, Player, PlayerId};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How fixtures are generated. Fixed once matches exist.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Single elimination; even roster required.
    #[default]
    Knockout,
    /// Round robin; every pair meets once. No champion is resolved.
    League,
}

/// Derived lifecycle of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    InProgress,
    Completed,
}

/// Full tournament record as stored by the persistence layer.
///
/// Every mutating method runs the matching engine operation, swaps in the new
/// players/matches only on success, and then refreshes `winner`, `runner_up` and `status`.
/// The one exception is a bracket fault while advancing a winner: the result itself is kept.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: Format,
    /// Insertion order; pairs knockout round 1 positionally.
    pub players: Vec<Player>,
    pub matches: Vec<GameMatch>,
    pub winner: Option<Player>,
    pub runner_up: Option<Player>,
    pub status: TournamentStatus,
}

impl Tournament {
    /// Create an upcoming tournament with no players.
    pub fn new(name: impl Into<String>, format: Format) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            players: Vec::new(),
            matches: Vec::new(),
            winner: None,
            runner_up: None,
            status: TournamentStatus::Upcoming,
        }
    }

    /// Create a tournament with an initial roster. No fixtures yet.
    ///
    /// The roster goes through the same checks as [`Tournament::add_player`]: names must be
    /// non-empty and unique (case-insensitive), and ids must not repeat.
    pub fn with_players(
        name: impl Into<String>,
        format: Format,
        players: Vec<Player>,
    ) -> Result<Self, EngineError> {
        for (i, player) in players.iter().enumerate() {
            if player.name.trim().is_empty() {
                return Err(EngineError::EmptyPlayerName);
            }
            if players[..i].iter().any(|p| p.has_name(&player.name)) {
                return Err(EngineError::DuplicatePlayerName);
            }
            if players[..i].iter().any(|p| p.id == player.id) {
                return Err(EngineError::DuplicatePlayerId(player.id));
            }
        }
        Ok(Self {
            players,
            ..Self::new(name, format)
        })
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        find_player(&self.players, id)
    }

    /// Display name for a slot, resolved at read time.
    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.get_player(id).map(|p| p.name.as_str())
    }

    fn ensure_no_fixtures(&self) -> Result<(), EngineError> {
        if self.matches.is_empty() {
            Ok(())
        } else {
            Err(EngineError::FixturesAlreadyGenerated)
        }
    }

    /// Add a player (only before fixtures exist). Names must be unique (case-insensitive).
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        external_ref: Option<String>,
    ) -> Result<PlayerId, EngineError> {
        self.ensure_no_fixtures()?;
        let mut player = Player::new(name);
        if player.name.is_empty() {
            return Err(EngineError::EmptyPlayerName);
        }
        if self.players.iter().any(|p| p.has_name(&player.name)) {
            return Err(EngineError::DuplicatePlayerName);
        }
        player.external_ref = external_ref;
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player (only before fixtures exist, so no match can reference them).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), EngineError> {
        self.ensure_no_fixtures()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Switch between knockout and league (only before fixtures exist).
    pub fn set_format(&mut self, format: Format) -> Result<(), EngineError> {
        self.ensure_no_fixtures()?;
        self.format = format;
        Ok(())
    }

    pub fn rename_player(&mut self, player_id: PlayerId, new_name: &str) -> Result<(), EngineError> {
        self.players = logic::rename_player(&self.players, player_id, new_name)?;
        self.refresh();
        Ok(())
    }

    /// (Re)generate all fixtures from the current roster. Discards recorded results.
    pub fn generate_fixtures(&mut self) -> Result<(), EngineError> {
        self.matches = logic::generate_fixtures(&self.players, self.format)?;
        self.refresh();
        Ok(())
    }

    /// Record a result. If the winner could not be advanced because the successor is full,
    /// the result is still committed and the bracket fault is returned.
    pub fn record_result(&mut self, match_id: MatchId, winner_id: PlayerId) -> Result<(), EngineError> {
        let update = logic::apply_result(&self.matches, match_id, winner_id)?;
        self.matches = update.matches;
        self.refresh();
        match update.fault {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }

    pub fn reassign_match_players(
        &mut self,
        match_id: MatchId,
        player1_id: PlayerId,
        player2_id: PlayerId,
    ) -> Result<(), EngineError> {
        self.matches = logic::reassign_match_players(
            &self.players,
            &self.matches,
            match_id,
            player1_id,
            player2_id,
        )?;
        self.refresh();
        Ok(())
    }

    pub fn cancel_match(&mut self, match_id: MatchId) -> Result<(), EngineError> {
        self.matches = logic::cancel_match(&self.matches, match_id)?;
        self.refresh();
        Ok(())
    }

    pub fn reschedule_match(
        &mut self,
        match_id: MatchId,
        date: Option<NaiveDate>,
        time: Option<NaiveTime>,
    ) -> Result<(), EngineError> {
        self.matches = logic::reschedule_match(&self.matches, match_id, date, time)?;
        Ok(())
    }

    /// Recompute winner, runner-up and status from the current matches.
    pub fn refresh(&mut self) {
        let (winner, runner_up) = logic::resolve_winner(&self.matches, &self.players);
        self.status = logic::derive_status(&self.matches, winner.as_ref());
        self.winner = winner;
        self.runner_up = runner_up;
    }
}
