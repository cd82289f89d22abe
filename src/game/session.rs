use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::GameConfig,
    db::{GameRepository, GuessRepository},
    dictionary::WordCorpus,
    error::GameError,
    game::{canonicalize, GuessEvaluator, WordValidator},
    models::{Game, GameStats, GameWithGuesses, Guess, GuessOutcome},
};

pub const DEFAULT_RECENT_GAMES: i64 = 10;
pub const MAX_RECENT_GAMES: i64 = 100;

/// Clamp a requested page size, falling back to the default when it is out of range
pub fn recent_games_limit(requested: Option<i64>) -> i64 {
    match requested {
        Some(limit) if (1..=MAX_RECENT_GAMES).contains(&limit) => limit,
        _ => DEFAULT_RECENT_GAMES,
    }
}

/// Bring the derived game fields up to date with the guess history.
///
/// Only moves state forward: the counter never drops and a set flag is never
/// cleared. Returns true when the game was changed.
pub fn reconcile(game: &mut Game, guesses: &[Guess]) -> bool {
    let recorded = guesses.iter().map(|g| g.guess_number).max().unwrap_or(0);
    let winning_guess = guesses.iter().find(|g| g.guess_word == game.target_word);

    let guess_count = game.guess_count.max(recorded);
    let is_won = game.is_won || winning_guess.is_some();
    let is_completed = game.is_completed || is_won || recorded >= game.max_guesses;

    let drifted = guess_count != game.guess_count
        || is_won != game.is_won
        || is_completed != game.is_completed;
    if !drifted {
        return false;
    }

    game.guess_count = guess_count;
    game.is_won = is_won;
    game.is_completed = is_completed;
    if is_completed && game.completed_at.is_none() {
        let finished_at = winning_guess.or_else(|| guesses.last());
        game.completed_at = Some(finished_at.map_or_else(Utc::now, |g| g.created_at));
    }
    true
}

/// Game session engine: creates games, accepts guesses and decides
/// win or loss.
#[derive(Clone)]
pub struct GameService {
    games: Arc<dyn GameRepository>,
    guesses: Arc<dyn GuessRepository>,
    words: Arc<dyn WordCorpus>,
    config: GameConfig,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository>,
        guesses: Arc<dyn GuessRepository>,
        words: Arc<dyn WordCorpus>,
        config: GameConfig,
    ) -> Self {
        Self {
            games,
            guesses,
            words,
            config,
        }
    }

    /// Start a game with a random target word of the configured length
    pub async fn create_new_game(&self) -> Result<Game, GameError> {
        let target = self
            .words
            .random_target_of_length(self.config.word_length)
            .ok_or(GameError::NoTargetWordsAvailable)?;
        let target_word = canonicalize(&target);

        let game = self
            .games
            .create_game(&target_word, self.config.max_guesses)
            .await?;

        tracing::info!("Created game {} ({} guesses)", game.id, game.max_guesses);
        Ok(game)
    }

    pub async fn get_game(&self, game_id: Uuid) -> Result<Game, GameError> {
        Ok(self.games.get_game(game_id).await?)
    }

    pub async fn get_game_with_guesses(&self, game_id: Uuid) -> Result<GameWithGuesses, GameError> {
        let game = self.get_game(game_id).await?;
        let guesses = self.guesses.get_guesses_by_game_id(game_id).await?;
        Ok(GameWithGuesses { game, guesses })
    }

    /// Submit a guess for a game.
    ///
    /// Validation failures are returned before anything is written. The guess
    /// row and the game update are separate writes; if the second one fails,
    /// the next accepted guess carries the repaired counters into its own
    /// game update.
    pub async fn make_guess(&self, game_id: Uuid, raw_guess: &str) -> Result<GuessOutcome, GameError> {
        let mut game = self.load_reconciled(game_id).await?;

        if game.is_completed {
            return Err(GameError::GameAlreadyCompleted);
        }

        let validator = WordValidator::new(self.words.as_ref(), self.config.word_length);
        let guess_word = validator.validate(raw_guess)?;

        if game.guess_count >= game.max_guesses {
            return Err(GameError::NoRemainingGuesses);
        }

        let result = GuessEvaluator::evaluate(&guess_word, &game.target_word).ok_or(
            GameError::InvalidGuessLength {
                expected: game.target_word.chars().count(),
                actual: guess_word.chars().count(),
            },
        )?;
        let guess_number = game.guess_count + 1;

        self.guesses
            .create_guess(game_id, &guess_word, guess_number, &result)
            .await?;

        game.guess_count = guess_number;
        game.is_won = GuessEvaluator::is_solved(&result);
        game.is_completed = game.is_game_complete();
        if game.is_completed {
            game.completed_at = Some(Utc::now());
        }

        self.games.update_game(&game).await?;

        tracing::debug!(
            "Game {}: guess {} '{}' ({:?})",
            game_id,
            guess_number,
            guess_word,
            game.status()
        );

        let guesses = self.guesses.get_guesses_by_game_id(game_id).await?;
        let message = Self::outcome_message(&game);

        Ok(GuessOutcome {
            game,
            guesses,
            message,
        })
    }

    /// Most recent games; the limit is clamped to 1..=100 (default 10)
    pub async fn get_recent_games(&self, limit: Option<i64>) -> Result<Vec<Game>, GameError> {
        Ok(self.games.get_recent_games(recent_games_limit(limit)).await?)
    }

    pub async fn delete_game(&self, game_id: Uuid) -> Result<(), GameError> {
        self.games.delete_game(game_id).await?;
        tracing::info!("Deleted game {}", game_id);
        Ok(())
    }

    /// Check whether a word would be accepted as a guess
    pub fn validate_word(&self, word: &str) -> bool {
        WordValidator::new(self.words.as_ref(), self.config.word_length).is_valid_word(word)
    }

    /// Check that the game store answers
    pub async fn health_check(&self) -> Result<(), GameError> {
        Ok(self.games.ping().await?)
    }

    pub fn get_game_stats(&self) -> GameStats {
        GameStats {
            total_words: self.words.size(),
            target_words: self.words.target_size(),
            max_guesses: self.config.max_guesses,
            word_length: self.config.word_length,
        }
    }

    /// Load a game and catch it up with its guess history, in memory only
    async fn load_reconciled(&self, game_id: Uuid) -> Result<Game, GameError> {
        let mut game = self.games.get_game(game_id).await?;
        let guesses = self.guesses.get_guesses_by_game_id(game_id).await?;
        if reconcile(&mut game, &guesses) {
            tracing::warn!(
                "Game {} was behind its {} stored guess(es); catching up",
                game.id,
                guesses.len()
            );
        }
        Ok(game)
    }

    fn outcome_message(game: &Game) -> String {
        if game.is_won {
            format!("Congratulations! You won in {} guess(es)!", game.guess_count)
        } else if game.is_completed {
            format!("Game over! The word was '{}'", game.target_word)
        } else {
            format!("Good guess! {} guess(es) remaining", game.remaining_guesses())
        }
    }
}
