use std::path::PathBuf;

use uuid::Uuid;

/// Coarse classification of a failure, used by callers to pick a response
/// without looking at message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself is wrong (bad guess, finished game, empty corpus)
    InvalidInput,
    /// The referenced game or guess does not exist
    NotFound,
    /// Lost a race against another writer; retrying may succeed
    Conflict,
    /// Storage or file system failure
    Infrastructure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Infrastructure => "infrastructure",
        }
    }

    pub fn is_client_fault(self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::NotFound)
    }
}

/// Errors raised by the word corpus
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read word file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} target word(s) missing from the validation list", .missing.len())]
    Inconsistent { missing: Vec<String> },
    #[error("word list has no configured sources to reload from")]
    NoSources,
}

/// Errors raised by game and guess repositories
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("guess number {guess_number} already exists for game {game_id}")]
    DuplicateGuessNumber { game_id: Uuid, guess_number: i32 },
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned by the game service
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no target words available")]
    NoTargetWordsAvailable,
    #[error("game not found: {0}")]
    GameNotFound(Uuid),
    #[error("game is already completed")]
    GameAlreadyCompleted,
    #[error("guess must be {expected} letters long")]
    InvalidGuessLength { expected: usize, actual: usize },
    #[error("'{0}' is not a valid word")]
    WordNotRecognized(String),
    #[error("no remaining guesses")]
    NoRemainingGuesses,
    #[error("another guess was recorded for game {game_id} first (guess number {guess_number})")]
    ConcurrentGuess { game_id: Uuid, guess_number: i32 },
    #[error(transparent)]
    Store(StoreError),
    #[error(transparent)]
    Corpus(#[from] CorpusError),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::NoTargetWordsAvailable
            | GameError::GameAlreadyCompleted
            | GameError::InvalidGuessLength { .. }
            | GameError::WordNotRecognized(_)
            | GameError::NoRemainingGuesses => ErrorKind::InvalidInput,
            GameError::GameNotFound(_) => ErrorKind::NotFound,
            GameError::ConcurrentGuess { .. } => ErrorKind::Conflict,
            GameError::Store(_) | GameError::Corpus(_) => ErrorKind::Infrastructure,
        }
    }
}

impl From<StoreError> for GameError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity: "game", id } => GameError::GameNotFound(id),
            StoreError::DuplicateGuessNumber {
                game_id,
                guess_number,
            } => GameError::ConcurrentGuess {
                game_id,
                guess_number,
            },
            other => GameError::Store(other),
        }
    }
}
