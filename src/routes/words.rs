use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::{dictionary::WordCorpus, error::GameError, models::GameStats, AppState};

/// Shortest and longest word lengths reported by the diagnostics endpoint
const DIAGNOSTIC_LENGTHS: std::ops::RangeInclusive<usize> = 3..=8;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub word: String,
    pub valid: bool,
}

#[derive(Debug, Serialize)]
pub struct LengthCounts {
    pub valid: usize,
    pub target: usize,
}

#[derive(Debug, Serialize)]
pub struct WordListDiagnostics {
    pub total_words: usize,
    pub target_words: usize,
    pub by_length: BTreeMap<usize, LengthCounts>,
    /// A random validation word, handy for checking what was loaded
    pub sample: Option<String>,
}

pub async fn validate_word(
    State(state): State<Arc<AppState>>,
    Path(word): Path<String>,
) -> Json<ValidateResponse> {
    let valid = state.service.validate_word(&word);
    Json(ValidateResponse { word, valid })
}

pub async fn word_list_diagnostics(State(state): State<Arc<AppState>>) -> Json<WordListDiagnostics> {
    let words = &state.words;
    let by_length = DIAGNOSTIC_LENGTHS
        .map(|length| {
            let counts = LengthCounts {
                valid: words.words_of_length(length).len(),
                target: words.target_words_of_length(length).len(),
            };
            (length, counts)
        })
        .collect();

    Json(WordListDiagnostics {
        total_words: words.size(),
        target_words: words.target_size(),
        by_length,
        sample: words.random_valid_word(),
    })
}

/// Re-read the word files; the previous words stay active if this fails
pub async fn reload_words(State(state): State<Arc<AppState>>) -> Result<Json<GameStats>, GameError> {
    state.words.reload().await?;
    tracing::info!("Word lists reloaded");
    Ok(Json(state.service.get_game_stats()))
}
