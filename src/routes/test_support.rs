//! In-process router over the memory store for route tests

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rand::{rngs::StdRng, SeedableRng};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    config::Config,
    db::{GameRepository, GuessRepository, MemoryStore},
    dictionary::WordList,
    game::GameService,
    AppState,
};

/// Validation words: HELLO, WORLD, CRANE. Every game targets HELLO.
pub fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    app_with_stores(store.clone(), store)
}

/// Same words as [`app`] over the given repositories
pub fn app_with_stores(games: Arc<dyn GameRepository>, guesses: Arc<dyn GuessRepository>) -> Router {
    let config = Config::from_lookup(|_| None).unwrap();
    let words = Arc::new(WordList::from_sources(
        "hello\nworld\ncrane\n",
        "hello\n",
        StdRng::seed_from_u64(3),
    ));
    let service = GameService::new(games, guesses, words.clone(), config.game.clone());
    let state = Arc::new(AppState {
        config,
        service,
        words,
        storage: "memory",
    });
    super::create_routes().with_state(state)
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
