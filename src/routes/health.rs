use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{dictionary::WordCorpus, AppState};

/// Health check endpoint; 503 when the game store does not answer
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let (status, database) = match state.service.health_check().await {
        Ok(()) => (StatusCode::OK, json!("ok")),
        Err(err) => {
            tracing::error!("Storage health check failed: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, json!(err.to_string()))
        }
    };

    let body = json!({
        "status": if status.is_success() { "ok" } else { "unavailable" },
        "service": "wordle-server",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.storage,
        "database": database,
        "words_loaded": state.words.size(),
        "word_length": state.config.game.word_length,
    });
    (status, Json(body))
}
