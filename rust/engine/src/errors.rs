use thiserror::Error;
use uuid::Uuid;

/// Broad classification of a [`GameError`] for transport adapters:
/// what kind of failure the caller should surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A game, player, category, or clue referenced by code or id does not exist.
    NotFound,
    /// Malformed input, rejected before any storage access.
    InvalidArgument,
    /// A precondition of the current game state or acting player was violated.
    InvalidOperation,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game with code {code} not found")]
    GameNotFound { code: String },
    #[error("player {player_id} not found in this game")]
    PlayerNotFound { player_id: Uuid },
    #[error("clue {clue_id} not found")]
    ClueNotFound { clue_id: Uuid },
    #[error("the clue is already answered or does not exist")]
    ClueUnavailable,
    #[error("clue point values must be 100, 200, 300, 400, or 500 (got {value})")]
    InvalidPointValue { value: u32 },
    #[error("a submitted category needs exactly five clues valued 100 through 500, one of each")]
    IncompleteCategory,
    #[error("clue question and answer text must not be blank")]
    BlankClueText,
    #[error("only the game creator can start the game")]
    NotCreator,
    #[error("at least {minimum} players are required to start (got {actual})")]
    NotEnoughPlayers { minimum: usize, actual: usize },
    #[error("all players must submit their categories before the game can start")]
    CategoriesNotSubmitted,
    #[error("the game is not in progress")]
    NotInProgress,
    #[error("the buzzer cannot be pressed in the current game state")]
    BuzzerClosed,
    #[error("cannot judge an answer before the buzzer has been pressed")]
    NothingToJudge,
    #[error("no clue is currently selected")]
    NoClueSelected,
    #[error("no player has buzzed in")]
    NoBuzzedPlayer,
    #[error("you cannot buzz on a clue from your own category")]
    OwnClue,
    #[error("only the owner of the clue can judge it")]
    NotClueOwner,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        use GameError::*;
        match self {
            GameNotFound { .. } | PlayerNotFound { .. } | ClueNotFound { .. } => {
                ErrorKind::NotFound
            }
            InvalidPointValue { .. } | IncompleteCategory | BlankClueText => {
                ErrorKind::InvalidArgument
            }
            ClueUnavailable | NotCreator | NotEnoughPlayers { .. } | CategoriesNotSubmitted
            | NotInProgress | BuzzerClosed | NothingToJudge | NoClueSelected | NoBuzzedPlayer
            | OwnClue | NotClueOwner => ErrorKind::InvalidOperation,
        }
    }
}
