//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in match slots and lookups).
pub type PlayerId = Uuid;

/// A player enrolled in a tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Opaque reference to a customer record. Never dereferenced here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_ref: Option<String>,
}

impl Player {
    /// Create a new player with a fresh id and the given (trimmed) name.
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            external_ref: None,
        }
    }

    /// Same as [`Player::new`], tagged with a customer reference.
    pub fn with_external_ref(name: impl Into<String>, external_ref: impl Into<String>) -> Self {
        Self {
            external_ref: Some(external_ref.into()),
            ..Self::new(name)
        }
    }

    /// Case-insensitive name comparison used for the uniqueness rule. Folds case for any
    /// script, not just ASCII.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Look up a player by id.
pub fn find_player(players: &[Player], id: PlayerId) -> Option<&Player> {
    players.iter().find(|p| p.id == id)
}
