use buzzboard_engine::errors::{ErrorKind, GameError};
use thiserror::Error;

/// Failures surfaced by [`crate::service::GameService`] operations: the rule
/// taxonomy from the engine plus the session crate's own internal conditions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Rule(#[from] GameError),
    #[error("game store lock poisoned")]
    StorePoisoned,
    #[error("could not allocate an unused join code")]
    CodesExhausted,
}

impl ServiceError {
    /// Stable machine-readable code for transport adapters.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Rule(rule) => match rule.kind() {
                ErrorKind::NotFound => "not_found",
                ErrorKind::InvalidArgument => "invalid_argument",
                ErrorKind::InvalidOperation => "invalid_operation",
            },
            ServiceError::StorePoisoned => "store_poisoned",
            ServiceError::CodesExhausted => "codes_exhausted",
        }
    }
}
