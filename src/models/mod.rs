pub mod game;

pub use game::{
    // Database models
    Game, Guess, GuessRecord,
    // Guess feedback
    LetterResult, LetterStatus,
    // Service results
    GameStats, GameStatus, GameWithGuesses, GuessOutcome,
};
