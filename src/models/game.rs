//! Match (game), its stage and status labels.

use crate::models::player::PlayerId;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a match.
///
/// Ids are handed out sequentially in generation order, so regenerating from the
/// same roster reproduces the same ids.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Qualitative label derived from a match's distance to the terminal round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Final,
    SemiFinal,
    QuarterFinal,
    RoundMatch,
}

impl Stage {
    /// Stage of a knockout match in `round` of a bracket with `total_rounds` rounds.
    pub fn for_round(round: u32, total_rounds: u32) -> Self {
        match total_rounds.saturating_sub(round) {
            0 => Stage::Final,
            1 => Stage::SemiFinal,
            2 => Stage::QuarterFinal,
            _ => Stage::RoundMatch,
        }
    }
}

/// Lifecycle of a single match. Orthogonal to [`GameMatch::completed`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Which of the two player slots of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Slot {
    One,
    Two,
}

/// A single 1v1 match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based, increasing toward the final.
    pub round: u32,
    pub stage: Stage,
    /// None while waiting for a previous round's winner.
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    /// Set only when `completed` is true.
    pub winner_id: Option<PlayerId>,
    pub completed: bool,
    pub status: MatchStatus,
    /// Match that receives this match's winner (knockout only).
    pub next_match_id: Option<MatchId>,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<NaiveTime>,
}

impl GameMatch {
    pub fn new(
        id: MatchId,
        round: u32,
        stage: Stage,
        player1_id: Option<PlayerId>,
        player2_id: Option<PlayerId>,
    ) -> Self {
        Self {
            id,
            round,
            stage,
            player1_id,
            player2_id,
            winner_id: None,
            completed: false,
            status: MatchStatus::Scheduled,
            next_match_id: None,
            scheduled_date: None,
            scheduled_time: None,
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<PlayerId> {
        match slot {
            Slot::One => self.player1_id,
            Slot::Two => self.player2_id,
        }
    }

    pub fn slot_mut(&mut self, slot: Slot) -> &mut Option<PlayerId> {
        match slot {
            Slot::One => &mut self.player1_id,
            Slot::Two => &mut self.player2_id,
        }
    }

    /// Which slot holds `player_id`, if any.
    pub fn slot_of(&self, player_id: PlayerId) -> Option<Slot> {
        if self.player1_id == Some(player_id) {
            Some(Slot::One)
        } else if self.player2_id == Some(player_id) {
            Some(Slot::Two)
        } else {
            None
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.slot_of(player_id).is_some()
    }

    /// Both slots filled.
    pub fn is_ready(&self) -> bool {
        self.player1_id.is_some() && self.player2_id.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == MatchStatus::Cancelled
    }

    /// The player in the other slot from the winner, once completed.
    pub fn loser_id(&self) -> Option<PlayerId> {
        let winner = self.winner_id?;
        match self.slot_of(winner)? {
            Slot::One => self.player2_id,
            Slot::Two => self.player1_id,
        }
    }

    pub fn set_winner(&mut self, winner_id: PlayerId) {
        self.winner_id = Some(winner_id);
        self.completed = true;
        self.status = MatchStatus::Completed;
    }

    /// Drop any recorded result. A cancelled match stays cancelled.
    pub fn clear_result(&mut self) {
        self.winner_id = None;
        self.completed = false;
        if self.status == MatchStatus::Completed {
            self.status = MatchStatus::Scheduled;
        }
    }
}

/// Look up a match by id.
pub fn find_match(matches: &[GameMatch], id: MatchId) -> Option<&GameMatch> {
    matches.iter().find(|m| m.id == id)
}

/// Index of a match by id.
pub(crate) fn match_index(matches: &[GameMatch], id: MatchId) -> Option<usize> {
    matches.iter().position(|m| m.id == id)
}
