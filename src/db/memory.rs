use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};
use uuid::Uuid;

use super::{GameRepository, GuessRepository, StoreResult};
use crate::{
    error::StoreError,
    models::{Game, Guess, LetterResult},
};

/// In-process store used when no database is configured, and by tests.
///
/// Guesses are keyed by `(game_id, guess_number)`, which gives the same
/// uniqueness guarantee as the database constraint.
#[derive(Default)]
pub struct MemoryStore {
    games: DashMap<Uuid, Game>,
    guesses: DashMap<(Uuid, i32), Guess>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn game_not_found(id: Uuid) -> StoreError {
        StoreError::NotFound { entity: "game", id }
    }

    fn guess_not_found(id: Uuid) -> StoreError {
        StoreError::NotFound {
            entity: "guess",
            id,
        }
    }
}

#[async_trait]
impl GameRepository for MemoryStore {
    async fn create_game(&self, target_word: &str, max_guesses: i32) -> StoreResult<Game> {
        let game = Game {
            id: Uuid::new_v4(),
            target_word: target_word.to_string(),
            created_at: Utc::now(),
            completed_at: None,
            is_completed: false,
            is_won: false,
            guess_count: 0,
            max_guesses,
        };
        self.games.insert(game.id, game.clone());
        Ok(game)
    }

    async fn get_game(&self, game_id: Uuid) -> StoreResult<Game> {
        self.games
            .get(&game_id)
            .map(|game| game.clone())
            .ok_or_else(|| Self::game_not_found(game_id))
    }

    async fn update_game(&self, game: &Game) -> StoreResult<()> {
        let mut stored = self
            .games
            .get_mut(&game.id)
            .ok_or_else(|| Self::game_not_found(game.id))?;
        stored.completed_at = game.completed_at;
        stored.is_completed = game.is_completed;
        stored.is_won = game.is_won;
        stored.guess_count = game.guess_count;
        Ok(())
    }

    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()> {
        self.games
            .remove(&game_id)
            .ok_or_else(|| Self::game_not_found(game_id))?;
        self.guesses.retain(|(id, _), _| *id != game_id);
        Ok(())
    }

    async fn get_recent_games(&self, limit: i64) -> StoreResult<Vec<Game>> {
        let mut games: Vec<Game> = self.games.iter().map(|game| game.clone()).collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        games.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(games)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[async_trait]
impl GuessRepository for MemoryStore {
    async fn create_guess(
        &self,
        game_id: Uuid,
        guess_word: &str,
        guess_number: i32,
        result: &[LetterResult],
    ) -> StoreResult<Guess> {
        if !self.games.contains_key(&game_id) {
            return Err(Self::game_not_found(game_id));
        }

        match self.guesses.entry((game_id, guess_number)) {
            Entry::Occupied(_) => Err(StoreError::DuplicateGuessNumber {
                game_id,
                guess_number,
            }),
            Entry::Vacant(slot) => {
                let guess = Guess {
                    id: Uuid::new_v4(),
                    game_id,
                    guess_word: guess_word.to_string(),
                    guess_number,
                    result: result.to_vec(),
                    created_at: Utc::now(),
                };
                slot.insert(guess.clone());
                Ok(guess)
            }
        }
    }

    async fn get_guess(&self, guess_id: Uuid) -> StoreResult<Guess> {
        self.guesses
            .iter()
            .find(|guess| guess.id == guess_id)
            .map(|guess| guess.clone())
            .ok_or_else(|| Self::guess_not_found(guess_id))
    }

    async fn get_guesses_by_game_id(&self, game_id: Uuid) -> StoreResult<Vec<Guess>> {
        let mut guesses: Vec<Guess> = self
            .guesses
            .iter()
            .filter(|guess| guess.game_id == game_id)
            .map(|guess| guess.clone())
            .collect();
        guesses.sort_by_key(|guess| guess.guess_number);
        Ok(guesses)
    }

    async fn get_latest_guess(&self, game_id: Uuid) -> StoreResult<Guess> {
        self.get_guesses_by_game_id(game_id)
            .await?
            .pop()
            .ok_or_else(|| Self::guess_not_found(game_id))
    }

    async fn delete_guess(&self, guess_id: Uuid) -> StoreResult<()> {
        let key = self
            .guesses
            .iter()
            .find(|guess| guess.id == guess_id)
            .map(|guess| *guess.key())
            .ok_or_else(|| Self::guess_not_found(guess_id))?;
        self.guesses.remove(&key);
        Ok(())
    }
}
