use async_trait::async_trait;
use sqlx::{types::Json, PgPool, Result};
use uuid::Uuid;

use super::{GameRepository, GuessRepository, StoreResult};
use crate::{
    error::StoreError,
    models::{Game, Guess, GuessRecord, LetterResult},
};

const GAME_COLUMNS: &str =
    "id, target_word, created_at, completed_at, is_completed, is_won, guess_count, max_guesses";
const GUESS_COLUMNS: &str = "id, game_id, guess_word, guess_number, result, created_at";

// Game queries
pub async fn create_game(pool: &PgPool, target_word: &str, max_guesses: i32) -> Result<Game> {
    sqlx::query_as::<_, Game>(&format!(
        r#"
        INSERT INTO games (target_word, max_guesses)
        VALUES ($1, $2)
        RETURNING {GAME_COLUMNS}
        "#
    ))
    .bind(target_word)
    .bind(max_guesses)
    .fetch_one(pool)
    .await
}

pub async fn get_game(pool: &PgPool, game_id: Uuid) -> Result<Option<Game>> {
    sqlx::query_as::<_, Game>(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = $1"))
        .bind(game_id)
        .fetch_optional(pool)
        .await
}

/// Returns the number of rows touched (0 when the game does not exist)
pub async fn update_game(pool: &PgPool, game: &Game) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE games
        SET completed_at = $2,
            is_completed = $3,
            is_won = $4,
            guess_count = $5
        WHERE id = $1
        "#,
    )
    .bind(game.id)
    .bind(game.completed_at)
    .bind(game.is_completed)
    .bind(game.is_won)
    .bind(game.guess_count)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Guesses go with the game through `ON DELETE CASCADE`
pub async fn delete_game(pool: &PgPool, game_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM games WHERE id = $1")
        .bind(game_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn get_recent_games(pool: &PgPool, limit: i64) -> Result<Vec<Game>> {
    sqlx::query_as::<_, Game>(&format!(
        "SELECT {GAME_COLUMNS} FROM games ORDER BY created_at DESC LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await
}

pub async fn ping(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

// Guess queries
pub async fn create_guess(
    pool: &PgPool,
    game_id: Uuid,
    guess_word: &str,
    guess_number: i32,
    result: &[LetterResult],
) -> Result<GuessRecord> {
    sqlx::query_as::<_, GuessRecord>(&format!(
        r#"
        INSERT INTO guesses (game_id, guess_word, guess_number, result)
        VALUES ($1, $2, $3, $4)
        RETURNING {GUESS_COLUMNS}
        "#
    ))
    .bind(game_id)
    .bind(guess_word)
    .bind(guess_number)
    .bind(Json(result))
    .fetch_one(pool)
    .await
}

pub async fn get_guess(pool: &PgPool, guess_id: Uuid) -> Result<Option<GuessRecord>> {
    sqlx::query_as::<_, GuessRecord>(&format!("SELECT {GUESS_COLUMNS} FROM guesses WHERE id = $1"))
        .bind(guess_id)
        .fetch_optional(pool)
        .await
}

pub async fn get_guesses_by_game_id(pool: &PgPool, game_id: Uuid) -> Result<Vec<GuessRecord>> {
    sqlx::query_as::<_, GuessRecord>(&format!(
        "SELECT {GUESS_COLUMNS} FROM guesses WHERE game_id = $1 ORDER BY guess_number ASC"
    ))
    .bind(game_id)
    .fetch_all(pool)
    .await
}

pub async fn get_latest_guess(pool: &PgPool, game_id: Uuid) -> Result<Option<GuessRecord>> {
    sqlx::query_as::<_, GuessRecord>(&format!(
        "SELECT {GUESS_COLUMNS} FROM guesses WHERE game_id = $1 ORDER BY guess_number DESC LIMIT 1"
    ))
    .bind(game_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_guess(pool: &PgPool, guess_id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM guesses WHERE id = $1")
        .bind(guess_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Postgres-backed game and guess repositories
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameRepository for PgStore {
    async fn create_game(&self, target_word: &str, max_guesses: i32) -> StoreResult<Game> {
        Ok(create_game(&self.pool, target_word, max_guesses).await?)
    }

    async fn get_game(&self, game_id: Uuid) -> StoreResult<Game> {
        get_game(&self.pool, game_id)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "game",
                id: game_id,
            })
    }

    async fn update_game(&self, game: &Game) -> StoreResult<()> {
        match update_game(&self.pool, game).await? {
            0 => Err(StoreError::NotFound {
                entity: "game",
                id: game.id,
            }),
            _ => Ok(()),
        }
    }

    async fn delete_game(&self, game_id: Uuid) -> StoreResult<()> {
        match delete_game(&self.pool, game_id).await? {
            0 => Err(StoreError::NotFound {
                entity: "game",
                id: game_id,
            }),
            _ => Ok(()),
        }
    }

    async fn get_recent_games(&self, limit: i64) -> StoreResult<Vec<Game>> {
        Ok(get_recent_games(&self.pool, limit).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(ping(&self.pool).await?)
    }
}

#[async_trait]
impl GuessRepository for PgStore {
    async fn create_guess(
        &self,
        game_id: Uuid,
        guess_word: &str,
        guess_number: i32,
        result: &[LetterResult],
    ) -> StoreResult<Guess> {
        match create_guess(&self.pool, game_id, guess_word, guess_number, result).await {
            Ok(record) => Ok(record.into()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateGuessNumber {
                game_id,
                guess_number,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_guess(&self, guess_id: Uuid) -> StoreResult<Guess> {
        get_guess(&self.pool, guess_id)
            .await?
            .map(Guess::from)
            .ok_or(StoreError::NotFound {
                entity: "guess",
                id: guess_id,
            })
    }

    async fn get_guesses_by_game_id(&self, game_id: Uuid) -> StoreResult<Vec<Guess>> {
        let records = get_guesses_by_game_id(&self.pool, game_id).await?;
        Ok(records.into_iter().map(Guess::from).collect())
    }

    async fn get_latest_guess(&self, game_id: Uuid) -> StoreResult<Guess> {
        get_latest_guess(&self.pool, game_id)
            .await?
            .map(Guess::from)
            .ok_or(StoreError::NotFound {
                entity: "guess",
                id: game_id,
            })
    }

    async fn delete_guess(&self, guess_id: Uuid) -> StoreResult<()> {
        match delete_guess(&self.pool, guess_id).await? {
            0 => Err(StoreError::NotFound {
                entity: "guess",
                id: guess_id,
            }),
            _ => Ok(()),
        }
    }
}
