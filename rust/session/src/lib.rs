//! Session engine for the buzzboard quiz.
//!
//! Wraps the pure core from `buzzboard-engine` with everything one running
//! process needs: the operation layer ([`service::GameService`]) that loads,
//! validates, mutates, and persists the game aggregate per call; the buzz
//! arbiter that turns racing buzzer presses into a deterministic first-wins
//! outcome; the store gateway with its in-memory implementation; and the
//! event bus that tells subscribers to re-fetch after every change.

pub mod arbiter;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod service;
pub mod store;

pub use arbiter::BuzzArbiter;
pub use config::{ConfigError, ServiceConfig};
pub use errors::ServiceError;
pub use events::{EventBus, EventReceiver, EventSubscription, GameEvent};
pub use logging::init_logging;
pub use service::GameService;
pub use store::{GameStore, MemoryGameStore};
