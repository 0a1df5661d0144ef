use crate::category::Category;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an external user account. Registration and authentication
/// live outside the core; the engine only ever compares `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: String,
}

impl Identity {
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }
}

/// A participant in one game. Owns at most one category; the score is always
/// derived from answered clues across the whole game (see `Game::score_of`),
/// never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub is_creator: bool,
    pub category: Option<Category>,
}

impl Player {
    pub fn new(identity: Identity, is_creator: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: identity.user_id,
            name: identity.name,
            is_creator,
            category: None,
        }
    }

    /// Whether this player's own category still holds unanswered clues.
    pub fn has_unanswered_clues(&self) -> bool {
        self.category
            .as_ref()
            .is_some_and(|c| c.clues.iter().any(|clue| !clue.is_answered()))
    }

    pub fn has_submitted_category(&self) -> bool {
        self.category.as_ref().is_some_and(|c| c.is_submitted)
    }
}
