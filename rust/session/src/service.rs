use crate::arbiter::BuzzArbiter;
use crate::config::{ConfigError, ServiceConfig};
use crate::errors::ServiceError;
use crate::events::{EventBus, GameEvent};
use crate::store::GameStore;
use buzzboard_engine::category::{Category, CategoryDraft};
use buzzboard_engine::code::{generate_code, normalize_code};
use buzzboard_engine::errors::GameError;
use buzzboard_engine::game::{Game, GameState};
use buzzboard_engine::player::{Identity, Player};
use buzzboard_engine::{rules, turn};
use chrono::Utc;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// The session engine: every game operation loads the authoritative
/// aggregate from the store, validates it against the state machine, mutates
/// in memory, persists wholesale, and notifies subscribers. Nothing is
/// cached across calls, so the store's answer is always the truth.
pub struct GameService {
    store: Arc<dyn GameStore>,
    events: EventBus,
    arbiter: BuzzArbiter,
    rng: Mutex<ChaCha20Rng>,
    code_attempts: u32,
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("code_attempts", &self.code_attempts)
            .finish_non_exhaustive()
    }
}

impl GameService {
    pub fn new(store: Arc<dyn GameStore>, events: EventBus) -> Self {
        Self::assemble(store, events, ServiceConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn GameStore>,
        events: EventBus,
        config: ServiceConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(store, events, config))
    }

    fn assemble(store: Arc<dyn GameStore>, events: EventBus, config: ServiceConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            store,
            events,
            arbiter: BuzzArbiter::new(),
            rng: Mutex::new(ChaCha20Rng::seed_from_u64(seed)),
            code_attempts: config.code_attempts,
        }
    }

    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    /// Current authoritative state of one game.
    pub fn game(&self, code: &str) -> Result<Game, ServiceError> {
        self.store.load_game(&normalize_code(code))
    }

    /// Opens a new session: a fresh join code and the owner attached as the
    /// only creator player. Nobody can be subscribed to a code that did not
    /// exist a moment ago, so there is no notification.
    pub fn create_game(&self, identity: Identity) -> Result<Game, ServiceError> {
        let code = self.unused_code()?;
        let creator = Player::new(identity, true);

        tracing::info!(code = %code, player_id = %creator.id, "creating game");
        self.store.save_game(Game::new(code, creator))
    }

    /// Idempotent join: a second call by the same user returns the current
    /// state untouched and fires no notification.
    pub fn join_game(&self, code: &str, identity: Identity) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let mut game = self.store.load_game(&code)?;

        if game.player_for_user(identity.user_id).is_some() {
            return Ok(game);
        }

        let player = Player::new(identity, false);
        let (player_id, name) = (player.id, player.name.clone());
        game.players.push(player);
        let game = self.store.save_game(game)?;

        tracing::info!(code = %code, player_id = %player_id, name = %name, "player joined");
        self.events.broadcast(GameEvent::PlayerJoined {
            code,
            player_id,
            name,
        });
        Ok(game)
    }

    /// Saves a player's category draft, optionally submitting it. Malformed
    /// input is rejected before any storage access.
    pub fn save_category(
        &self,
        code: &str,
        player_id: Uuid,
        draft: CategoryDraft,
        submit: bool,
    ) -> Result<Category, ServiceError> {
        rules::validate_point_values(&draft.clues)?;
        if submit {
            rules::validate_submission(&draft.clues)?;
        }

        let code = normalize_code(code);
        let game = self.store.load_game(&code)?;
        let player = game
            .player(player_id)
            .ok_or(GameError::PlayerNotFound { player_id })?;
        let existing_id = player.category.as_ref().map(|c| c.id);

        let category = Category::from_draft(player_id, existing_id, draft, submit);
        let category = self.store.save_category(category)?;

        tracing::debug!(code = %code, player_id = %player_id, submitted = submit, "category saved");
        if submit {
            self.events
                .broadcast(GameEvent::CategorySubmitted { code, player_id });
        } else {
            self.events.broadcast(GameEvent::GameChanged { code });
        }
        Ok(category)
    }

    /// Moves the lobby into play. Only the creator's user may start, at least
    /// two players must be present, and every board must be submitted; the
    /// creator picks the first clue.
    pub fn start_game(&self, code: &str, acting_user_id: Uuid) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let mut game = self.store.load_game(&code)?;

        let (creator_id, creator_user_id) = {
            let creator = game.creator().ok_or(GameError::NotCreator)?;
            (creator.id, creator.user_id)
        };
        if creator_user_id != acting_user_id {
            return Err(GameError::NotCreator.into());
        }
        if game.players.len() < rules::MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                minimum: rules::MIN_PLAYERS,
                actual: game.players.len(),
            }
            .into());
        }
        if !game.all_categories_submitted() {
            return Err(GameError::CategoriesNotSubmitted.into());
        }

        game.current_choosing_player_id = Some(creator_id);
        game.state = GameState::InProgress;
        let game = self.store.save_game(game)?;

        tracing::info!(code = %code, players = game.players.len(), "game started");
        self.events.broadcast(GameEvent::GameStarted { code });
        Ok(game)
    }

    /// Puts one unanswered clue in play. The caller learns "unavailable"
    /// whether the clue is missing, already answered, or from some other
    /// game's board. Selecting from one's own category is deliberately
    /// allowed; the restriction sits at buzz time.
    pub fn select_clue(&self, code: &str, clue_id: Uuid) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let mut game = self.store.load_game(&code)?;

        if game.state != GameState::InProgress {
            return Err(GameError::NotInProgress.into());
        }

        let clue = match self.store.load_clue(clue_id) {
            Ok(clue) => clue,
            Err(ServiceError::Rule(_)) => return Err(GameError::ClueUnavailable.into()),
            Err(other) => return Err(other),
        };
        if clue.is_answered() || game.find_clue(clue_id).is_none() {
            return Err(GameError::ClueUnavailable.into());
        }

        game.selected_clue_id = Some(clue_id);
        game.state = GameState::ClueSelected;
        let game = self.store.save_game(game)?;

        tracing::debug!(code = %code, clue_id = %clue_id, "clue selected");
        self.events.broadcast(GameEvent::GameChanged { code });
        Ok(game)
    }

    /// Registers a buzz, first-writer-wins. Racing callers serialize on the
    /// per-game arbiter lock, which is held from the authoritative re-read
    /// through the persist; losers get the winner's state back unchanged,
    /// with nothing persisted and nobody notified.
    pub fn press_buzzer(&self, code: &str, player_id: Uuid) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let lock = self.arbiter.lock_for(&code);
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut game = self.store.load_game(&code)?;

        // BuzzerPressed is legal here: it is the benign shape of losing the race
        if !matches!(
            game.state,
            GameState::ClueSelected | GameState::BuzzerPressed
        ) {
            return Err(GameError::BuzzerClosed.into());
        }
        let clue_id = game.selected_clue_id.ok_or(GameError::NoClueSelected)?;
        if game.player(player_id).is_none() {
            return Err(GameError::PlayerNotFound { player_id }.into());
        }
        let owner = game.clue_owner(clue_id).ok_or(GameError::NoClueSelected)?;
        if owner == player_id {
            return Err(GameError::OwnClue.into());
        }

        if let Some(winner) = game.buzzed_player_id {
            tracing::debug!(code = %code, player_id = %player_id, winner = %winner, "buzz lost the race");
            return Ok(game);
        }

        game.buzzed_player_id = Some(player_id);
        game.buzzed_at = Some(Utc::now());
        game.state = GameState::BuzzerPressed;
        let game = self.store.save_game(game)?;

        tracing::info!(code = %code, player_id = %player_id, "buzzer pressed");
        self.events.broadcast(GameEvent::GameChanged { code });
        Ok(game)
    }

    /// The clue owner rules on the buzzed player's answer. Correct closes the
    /// clue for the buzzer and hands the board to the next chooser; incorrect
    /// reopens the same clue for the remaining buzzers. Either way the buzzer
    /// fields reset.
    pub fn judge_answer(
        &self,
        code: &str,
        judging_player_id: Uuid,
        is_correct: bool,
    ) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let mut game = self.store.load_game(&code)?;

        if game.state != GameState::BuzzerPressed {
            return Err(GameError::NothingToJudge.into());
        }
        let clue_id = game.selected_clue_id.ok_or(GameError::NoClueSelected)?;
        let buzzed_player_id = game.buzzed_player_id.ok_or(GameError::NoBuzzedPlayer)?;
        let owner = game.clue_owner(clue_id).ok_or(GameError::NoClueSelected)?;
        if owner != judging_player_id {
            return Err(GameError::NotClueOwner.into());
        }

        if is_correct {
            if let Some(clue) = game.find_clue_mut(clue_id) {
                clue.answered_by_player_id = Some(buzzed_player_id);
            }
            self.close_clue(&mut game, buzzed_player_id);
        } else {
            game.state = GameState::ClueSelected;
        }
        game.buzzed_player_id = None;
        game.buzzed_at = None;

        let game = self.store.save_game(game)?;
        tracing::info!(code = %code, judge = %judging_player_id, correct = is_correct, "answer judged");
        self.events.broadcast(GameEvent::GameChanged { code });
        Ok(game)
    }

    /// The clue owner concedes that nobody can answer. The clue closes
    /// against the owner at negative value (`Game::score_of` applies the
    /// sign); completion and next-chooser logic match the correct-answer
    /// path with the owner as answerer.
    pub fn no_one_can_answer(
        &self,
        code: &str,
        judging_player_id: Uuid,
    ) -> Result<Game, ServiceError> {
        let code = normalize_code(code);
        let mut game = self.store.load_game(&code)?;

        if game.state != GameState::ClueSelected {
            return Err(GameError::NoClueSelected.into());
        }
        let clue_id = game.selected_clue_id.ok_or(GameError::NoClueSelected)?;
        let owner = game.clue_owner(clue_id).ok_or(GameError::NoClueSelected)?;
        if owner != judging_player_id {
            return Err(GameError::NotClueOwner.into());
        }

        if let Some(clue) = game.find_clue_mut(clue_id) {
            clue.answered_by_player_id = Some(judging_player_id);
            clue.no_one_could_answer = true;
        }
        self.close_clue(&mut game, judging_player_id);
        game.buzzed_player_id = None;
        game.buzzed_at = None;

        let game = self.store.save_game(game)?;
        tracing::info!(code = %code, owner = %judging_player_id, "no one could answer");
        self.events.broadcast(GameEvent::GameChanged { code });
        Ok(game)
    }

    // Shared tail of the two clue-closing paths: completion check, next
    // chooser, selection cleared.
    fn close_clue(&self, game: &mut Game, answerer_id: Uuid) {
        if game.all_clues_answered() {
            game.state = GameState::Finished;
        } else {
            let next = turn::next_chooser(game, answerer_id, &mut *self.rng_guard());
            game.current_choosing_player_id = Some(next);
            game.state = GameState::InProgress;
        }
        game.selected_clue_id = None;
    }

    fn unused_code(&self) -> Result<String, ServiceError> {
        for _ in 0..self.code_attempts {
            let candidate = generate_code(&mut *self.rng_guard());
            match self.store.load_game(&candidate) {
                Err(ServiceError::Rule(GameError::GameNotFound { .. })) => return Ok(candidate),
                Ok(_) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(ServiceError::CodesExhausted)
    }

    fn rng_guard(&self) -> MutexGuard<'_, ChaCha20Rng> {
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
