use crate::errors::ServiceError;
use buzzboard_engine::category::{Category, Clue};
use buzzboard_engine::code::normalize_code;
use buzzboard_engine::errors::GameError;
use buzzboard_engine::game::Game;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Narrow persistence boundary the session engine talks to. Reads hand back
/// the fully hydrated aggregate (players, categories, clues); writes persist
/// it wholesale. Durable backends implement this outside the core.
pub trait GameStore: Send + Sync {
    fn load_game(&self, code: &str) -> Result<Game, ServiceError>;
    fn load_clue(&self, clue_id: Uuid) -> Result<Clue, ServiceError>;
    fn save_game(&self, game: Game) -> Result<Game, ServiceError>;
    /// Insert-or-update of one player's category inside its game.
    fn save_category(&self, category: Category) -> Result<Category, ServiceError>;
}

/// Process-local store keeping every game aggregate under its normalized
/// join code. Reads clone out so callers never alias stored state.
#[derive(Debug, Default)]
pub struct MemoryGameStore {
    games: RwLock<HashMap<String, Game>>,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_count(&self) -> usize {
        match self.games.read() {
            Ok(guard) => guard.len(),
            Err(_) => 0,
        }
    }
}

impl GameStore for MemoryGameStore {
    fn load_game(&self, code: &str) -> Result<Game, ServiceError> {
        let key = normalize_code(code);
        let games = self.games.read().map_err(|_| ServiceError::StorePoisoned)?;
        games
            .get(&key)
            .cloned()
            .ok_or_else(|| GameError::GameNotFound { code: key }.into())
    }

    fn load_clue(&self, clue_id: Uuid) -> Result<Clue, ServiceError> {
        let games = self.games.read().map_err(|_| ServiceError::StorePoisoned)?;
        games
            .values()
            .find_map(|game| game.find_clue(clue_id))
            .cloned()
            .ok_or_else(|| GameError::ClueNotFound { clue_id }.into())
    }

    fn save_game(&self, game: Game) -> Result<Game, ServiceError> {
        let key = normalize_code(&game.code);
        let mut games = self.games.write().map_err(|_| ServiceError::StorePoisoned)?;
        games.insert(key, game.clone());
        Ok(game)
    }

    fn save_category(&self, category: Category) -> Result<Category, ServiceError> {
        let player_id = category.player_id;
        let mut games = self.games.write().map_err(|_| ServiceError::StorePoisoned)?;
        let game = games
            .values_mut()
            .find(|game| game.players.iter().any(|p| p.id == player_id))
            .ok_or(GameError::PlayerNotFound { player_id })?;

        if let Some(player) = game.players.iter_mut().find(|p| p.id == player_id) {
            player.category = Some(category.clone());
        }
        Ok(category)
    }
}
