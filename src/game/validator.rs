use crate::{dictionary::WordCorpus, error::GameError};

/// Canonical form used for every comparison: trimmed and uppercased
pub fn canonicalize(word: &str) -> String {
    word.trim().to_uppercase()
}

pub struct WordValidator<'a> {
    corpus: &'a dyn WordCorpus,
    word_length: usize,
}

impl<'a> WordValidator<'a> {
    pub fn new(corpus: &'a dyn WordCorpus, word_length: usize) -> Self {
        Self {
            corpus,
            word_length,
        }
    }

    /// Check that an already canonical word has the configured length
    pub fn check_length(&self, word: &str) -> Result<(), GameError> {
        let actual = word.chars().count();
        if actual != self.word_length {
            return Err(GameError::InvalidGuessLength {
                expected: self.word_length,
                actual,
            });
        }
        Ok(())
    }

    /// Check that an already canonical word is in the validation list
    pub fn check_known(&self, word: &str) -> Result<(), GameError> {
        if !self.corpus.contains(word) {
            return Err(GameError::WordNotRecognized(word.to_string()));
        }
        Ok(())
    }

    /// Canonicalize and run both checks, returning the canonical word
    pub fn validate(&self, raw: &str) -> Result<String, GameError> {
        let word = canonicalize(raw);
        self.check_length(&word)?;
        self.check_known(&word)?;
        Ok(word)
    }

    pub fn is_valid_word(&self, raw: &str) -> bool {
        self.validate(raw).is_ok()
    }
}
