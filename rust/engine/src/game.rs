use crate::category::Clue;
use crate::player::Player;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of one game session. `Finished` is terminal and is reached only
/// once every clue across every player's category has been answered.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    WaitingForCategories,
    InProgress,
    ClueSelected,
    BuzzerPressed,
    Finished,
}

/// The session aggregate: a game exclusively owns its players, which own
/// their categories and clues. Everything an operation needs to decide is
/// reachable from here; cross-references (`selected_clue`, `buzzed_player`)
/// are lookups into the owned graph, not duplicated state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Uuid,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
    pub state: GameState,
    pub current_choosing_player_id: Option<Uuid>,
    pub selected_clue_id: Option<Uuid>,
    pub buzzed_player_id: Option<Uuid>,
    pub buzzed_at: Option<DateTime<Utc>>,
}

impl Game {
    pub fn new(code: impl Into<String>, creator: Player) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            created_at: Utc::now(),
            players: vec![creator],
            state: GameState::WaitingForCategories,
            current_choosing_player_id: None,
            selected_clue_id: None,
            buzzed_player_id: None,
            buzzed_at: None,
        }
    }

    pub fn player(&self, player_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn player_for_user(&self, user_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn creator(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_creator)
    }

    pub fn find_clue(&self, clue_id: Uuid) -> Option<&Clue> {
        self.clues().find(|c| c.id == clue_id)
    }

    pub fn find_clue_mut(&mut self, clue_id: Uuid) -> Option<&mut Clue> {
        self.players
            .iter_mut()
            .filter_map(|p| p.category.as_mut())
            .flat_map(|c| c.clues.iter_mut())
            .find(|c| c.id == clue_id)
    }

    /// The player owning the category that holds `clue_id`.
    pub fn clue_owner(&self, clue_id: Uuid) -> Option<Uuid> {
        self.players
            .iter()
            .filter_map(|p| p.category.as_ref())
            .find(|c| c.clues.iter().any(|clue| clue.id == clue_id))
            .map(|c| c.player_id)
    }

    pub fn selected_clue(&self) -> Option<&Clue> {
        self.selected_clue_id.and_then(|id| self.find_clue(id))
    }

    pub fn buzzed_player(&self) -> Option<&Player> {
        self.buzzed_player_id.and_then(|id| self.player(id))
    }

    pub fn all_categories_submitted(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.has_submitted_category())
    }

    pub fn all_clues_answered(&self) -> bool {
        !self.players.is_empty() && self.clues().all(|c| c.is_answered())
    }

    /// Derived score: the fold over answered clues is the only place the
    /// scoring convention lives. A clue closed through the no-answer penalty
    /// counts against its owner instead of for them.
    pub fn score_of(&self, player_id: Uuid) -> i32 {
        self.clues()
            .filter(|c| c.answered_by_player_id == Some(player_id))
            .map(|c| {
                if c.no_one_could_answer {
                    -(c.point_value as i32)
                } else {
                    c.point_value as i32
                }
            })
            .sum()
    }

    fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.players
            .iter()
            .filter_map(|p| p.category.as_ref())
            .flat_map(|c| c.clues.iter())
    }
}
