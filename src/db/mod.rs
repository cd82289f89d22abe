use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    error::StoreError,
    models::{Game, Guess, LetterResult},
};

pub mod memory;
pub mod queries;

pub use memory::MemoryStore;
pub use queries::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> sqlx::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Persistence for game records
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Insert a fresh game with no guesses
    async fn create_game(&self, target_word: &str, max_guesses: i32) -> StoreResult<Game>;

    async fn get_game(&self, game_id: Uuid) -> StoreResult<Game>;

    /// Write back the mutable fields (counters, flags, completion time)
    async fn update_game(&self, game: &Game) -> StoreResult<()>;

    /// Delete a game together with its guesses
    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()>;

    /// Most recently created games first
    async fn get_recent_games(&self, limit: i64) -> StoreResult<Vec<Game>>;

    /// Check that the store is reachable
    async fn ping(&self) -> StoreResult<()>;
}

/// Persistence for guess records
#[async_trait]
pub trait GuessRepository: Send + Sync {
    /// Insert a guess. Fails with `DuplicateGuessNumber` if the game already
    /// has a guess with this number.
    async fn create_guess(
        &self,
        game_id: Uuid,
        guess_word: &str,
        guess_number: i32,
        result: &[LetterResult],
    ) -> StoreResult<Guess>;

    async fn get_guess(&self, guess_id: Uuid) -> StoreResult<Guess>;

    /// All guesses of a game ordered by guess number
    async fn get_guesses_by_game_id(&self, game_id: Uuid) -> StoreResult<Vec<Guess>>;

    async fn get_latest_guess(&self, game_id: Uuid) -> StoreResult<Guess>;

    async fn delete_guess(&self, guess_id: Uuid) -> StoreResult<()>;
}
