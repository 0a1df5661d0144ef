//! # buzzboard-engine: Quiz Game Core
//!
//! The pure core of a live, multiplayer, Jeopardy-style quiz: players each
//! author a category of five clues, take turns selecting clues from each
//! other's boards, race to buzz, and have the clue owner judge the answer.
//! This crate holds the entity model, the rule checks, and the deterministic
//! pieces (join codes, turn resolution); the stateful session engine lives in
//! the companion session crate.
//!
//! ## Core Modules
//!
//! - [`game`] - Game aggregate, lifecycle states, and derived queries
//! - [`player`] - Player entity and external identity reference
//! - [`category`] - Category/Clue entities and authoring drafts
//! - [`rules`] - Point-value and submission validation
//! - [`code`] - Join-code alphabet, generation, and normalization
//! - [`turn`] - Next-chooser resolution after a clue is closed
//! - [`errors`] - Error taxonomy for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use buzzboard_engine::game::{Game, GameState};
//! use buzzboard_engine::player::{Identity, Player};
//! use uuid::Uuid;
//!
//! let creator = Player::new(Identity::new(Uuid::new_v4(), "Asta"), true);
//! let game = Game::new("ABQ2X9", creator);
//!
//! assert_eq!(game.state, GameState::WaitingForCategories);
//! assert_eq!(game.score_of(game.players[0].id), 0);
//! ```
//!
//! ## Deterministic Randomness
//!
//! Join codes and turn hand-offs draw from a caller-supplied RNG, so every
//! outcome is reproducible under a seed:
//!
//! ```rust
//! use buzzboard_engine::code::generate_code;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let code = generate_code(&mut rng);
//! assert_eq!(code.len(), 6);
//! ```

pub mod category;
pub mod code;
pub mod errors;
pub mod game;
pub mod player;
pub mod rules;
pub mod turn;
