pub mod games;
pub mod health;
pub mod words;

#[cfg(test)]
pub mod test_support;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::{
    error::{ErrorKind, GameError},
    AppState,
};

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/games", post(games::create_game).get(games::list_games))
        .route("/games/{id}", get(games::get_game).delete(games::delete_game))
        .route("/games/{id}/guesses", post(games::make_guess))
        .route("/words", get(words::word_list_diagnostics))
        .route("/words/{word}/validate", get(words::validate_word))
        .route("/words/reload", post(words::reload_words))
        .route("/stats", get(games::get_stats))
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = match kind {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if kind.is_client_fault() {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": self.to_string(),
            "kind": kind.as_str(),
        }));
        (status, body).into_response()
    }
}
