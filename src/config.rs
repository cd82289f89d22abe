use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::dictionary::WordSources;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub game: GameConfig,
    pub words: WordsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres URL; the in-memory store is used when unset
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub max_guesses: i32,
    pub word_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_guesses: 6,
            word_length: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WordsConfig {
    pub valid_path: PathBuf,
    pub target_path: PathBuf,
    /// Refuse to start if a target word is missing from the validation list
    pub strict: bool,
}

impl WordsConfig {
    pub fn sources(&self) -> WordSources {
        WordSources {
            valid_path: self.valid_path.clone(),
            target_path: self.target_path.clone(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the environment in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections: var("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a number")?,
        };

        let server = ServerConfig {
            host: var("HOST", "0.0.0.0"),
            port: var("PORT", "8080")
                .parse()
                .context("PORT must be a number")?,
        };

        let game = GameConfig {
            max_guesses: var("MAX_GUESSES", "6")
                .parse()
                .context("MAX_GUESSES must be a number")?,
            word_length: var("WORD_LENGTH", "5")
                .parse()
                .context("WORD_LENGTH must be a number")?,
        };
        ensure!(game.max_guesses >= 1, "MAX_GUESSES must be at least 1");
        ensure!(game.word_length >= 1, "WORD_LENGTH must be at least 1");

        let words = WordsConfig {
            valid_path: var("VALID_WORDS_PATH", "./valid-wordle-words.txt").into(),
            target_path: var("TARGET_WORDS_PATH", "./common-target-words.txt").into(),
            strict: var("STRICT_CORPUS", "false")
                .parse()
                .context("STRICT_CORPUS must be true or false")?,
        };

        Ok(Config {
            database,
            server,
            game,
            words,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database.url.as_deref()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
