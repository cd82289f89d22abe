mod config;
mod db;
mod dictionary;
mod error;
mod game;
mod models;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::Config;
use db::{GameRepository, GuessRepository, MemoryStore, PgStore};
use dictionary::{WordCorpus, WordList};
use game::GameService;
use rand::{rngs::StdRng, SeedableRng};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub service: GameService,
    pub words: Arc<WordList>,
    /// Which store backs the service ("postgres" or "memory")
    pub storage: &'static str,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordle_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Wordle server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Load word lists; the server is useless without them
    let words = WordList::load(config.words.sources(), config.words.strict, StdRng::from_os_rng())
        .await
        .context("failed to load word lists")?;
    let words = Arc::new(words);
    if words.is_empty() {
        tracing::warn!("Target word list is empty; new games cannot be created");
    }

    // Pick storage
    let (games, guesses, storage) = match config.database_url() {
        Some(url) => {
            let pool = db::create_pool(url, config.database.max_connections).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Database migrations completed");

            let store = Arc::new(PgStore::new(pool));
            (
                store.clone() as Arc<dyn GameRepository>,
                store as Arc<dyn GuessRepository>,
                "postgres",
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; games are kept in memory only");
            let store = Arc::new(MemoryStore::new());
            (
                store.clone() as Arc<dyn GameRepository>,
                store as Arc<dyn GuessRepository>,
                "memory",
            )
        }
    };

    let service = GameService::new(games, guesses, words.clone(), config.game.clone());
    tracing::info!(
        "Game service ready: {} words, {} targets, {} guesses of {} letters",
        words.size(),
        words.target_size(),
        config.game.max_guesses,
        config.game.word_length
    );

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        service,
        words,
        storage,
    });

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::create_routes()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
