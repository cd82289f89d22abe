use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::GameError,
    models::{Game, GameStats, GameStatus, Guess},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct MakeGuessRequest {
    pub guess_word: String,
}

#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    pub limit: Option<i64>,
}

/// Game as shown to players; the target word stays hidden until the game ends
#[derive(Debug, Serialize)]
pub struct GameView {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_word: Option<String>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub is_won: bool,
    pub guess_count: i32,
    pub max_guesses: i32,
}

impl From<Game> for GameView {
    fn from(game: Game) -> Self {
        let status = game.status();
        Self {
            id: game.id,
            target_word: game.is_completed.then_some(game.target_word),
            status,
            created_at: game.created_at,
            completed_at: game.completed_at,
            is_completed: game.is_completed,
            is_won: game.is_won,
            guess_count: game.guess_count,
            max_guesses: game.max_guesses,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub game: GameView,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub guesses: Vec<Guess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<GameResponse>), GameError> {
    let game = state.service.create_new_game().await?;
    Ok((
        StatusCode::CREATED,
        Json(GameResponse {
            game: game.into(),
            guesses: Vec::new(),
            message: None,
        }),
    ))
}

pub async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListGamesQuery>,
) -> Result<Json<Vec<GameView>>, GameError> {
    let games = state.service.get_recent_games(query.limit).await?;
    Ok(Json(games.into_iter().map(GameView::from).collect()))
}

pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, GameError> {
    let full = state.service.get_game_with_guesses(game_id).await?;
    Ok(Json(GameResponse {
        game: full.game.into(),
        guesses: full.guesses,
        message: None,
    }))
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
) -> Result<StatusCode, GameError> {
    state.service.delete_game(game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn make_guess(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<Uuid>,
    Json(payload): Json<MakeGuessRequest>,
) -> Result<Json<GameResponse>, GameError> {
    let outcome = state.service.make_guess(game_id, &payload.guess_word).await?;
    Ok(Json(GameResponse {
        game: outcome.game.into(),
        guesses: outcome.guesses,
        message: Some(outcome.message),
    }))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<GameStats> {
    Json(state.service.get_game_stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, send};
    use axum::Router;
    use serde_json::json;

    async fn new_game(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/games", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["game"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_new_game_hides_target() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/games", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["game"]["guess_count"], 0);
        assert_eq!(body["game"]["status"], "new");
        assert!(body["game"].get("target_word").is_none());
    }

    #[tokio::test]
    async fn test_guess_flow_until_win() {
        let app = app();
        let id = new_game(&app).await;
        let uri = format!("/api/games/{}/guesses", id);

        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "world"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Good guess! 5 guess(es) remaining");
        assert_eq!(
            body["guesses"][0]["result"][1],
            json!({"letter": "O", "status": "present"})
        );

        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "HELLO"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["game"]["is_won"], true);
        assert_eq!(body["game"]["target_word"], "HELLO");
        assert_eq!(body["message"], "Congratulations! You won in 2 guess(es)!");

        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "crane"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_input");
        assert_eq!(body["error"], "game is already completed");

        let (status, body) = send(&app, "GET", &format!("/api/games/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["guesses"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bad_guesses_are_client_errors() {
        let app = app();
        let id = new_game(&app).await;
        let uri = format!("/api/games/{}/guesses", id);

        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "hi"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "guess must be 5 letters long");

        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "xyzzy"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "'XYZZY' is not a valid word");
    }

    #[tokio::test]
    async fn test_unknown_game_is_404() {
        let app = app();
        let uri = format!("/api/games/{}/guesses", Uuid::new_v4());
        let (status, body) = send(&app, "POST", &uri, Some(json!({"guess_word": "hello"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "not_found");

        let (status, _) = send(&app, "DELETE", &format!("/api/games/{}", Uuid::new_v4()), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_and_delete_games() {
        let app = app();
        let first = new_game(&app).await;
        new_game(&app).await;

        let (status, body) = send(&app, "GET", "/api/games?limit=500", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = send(&app, "DELETE", &format!("/api/games/{}", first), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", "/api/games", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_stats() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"total_words": 3, "target_words": 1, "max_guesses": 6, "word_length": 5})
        );
    }
}
