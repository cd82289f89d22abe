use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Feedback for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// Right letter, right position
    Correct,
    /// Right letter, wrong position
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResult {
    pub letter: char,
    pub status: LetterStatus,
}

/// Where a game sits in its lifecycle, derived from the stored flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    New,
    InProgress,
    Won,
    Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: Uuid,
    pub target_word: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub is_won: bool,
    pub guess_count: i32,
    pub max_guesses: i32,
}

impl Game {
    /// Check whether the game is over based on win status or guess count
    pub fn is_game_complete(&self) -> bool {
        self.is_won || self.guess_count >= self.max_guesses
    }

    pub fn remaining_guesses(&self) -> i32 {
        (self.max_guesses - self.guess_count).max(0)
    }

    pub fn status(&self) -> GameStatus {
        if self.is_won {
            GameStatus::Won
        } else if self.is_completed {
            GameStatus::Lost
        } else if self.guess_count == 0 {
            GameStatus::New
        } else {
            GameStatus::InProgress
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guess {
    pub id: Uuid,
    pub game_id: Uuid,
    pub guess_word: String,
    pub guess_number: i32,
    pub result: Vec<LetterResult>,
    pub created_at: DateTime<Utc>,
}

/// Row shape of the `guesses` table; `result` is stored as JSONB
#[derive(Debug, FromRow)]
pub struct GuessRecord {
    pub id: Uuid,
    pub game_id: Uuid,
    pub guess_word: String,
    pub guess_number: i32,
    pub result: Json<Vec<LetterResult>>,
    pub created_at: DateTime<Utc>,
}

impl From<GuessRecord> for Guess {
    fn from(record: GuessRecord) -> Self {
        Self {
            id: record.id,
            game_id: record.game_id,
            guess_word: record.guess_word,
            guess_number: record.guess_number,
            result: record.result.0,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameWithGuesses {
    pub game: Game,
    pub guesses: Vec<Guess>,
}

/// Result of a successful guess
#[derive(Debug, Clone, Serialize)]
pub struct GuessOutcome {
    pub game: Game,
    pub guesses: Vec<Guess>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub total_words: usize,
    pub target_words: usize,
    pub max_guesses: i32,
    pub word_length: usize,
}
