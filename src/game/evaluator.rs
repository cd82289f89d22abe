use crate::models::{LetterResult, LetterStatus};

pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Score `guess` against `target` letter by letter.
    ///
    /// Comparison is case-insensitive. Returns `None` when the two words differ
    /// in length.
    ///
    /// Rules (standard Wordle):
    /// - First pass marks exact position matches as correct and consumes
    ///   that target letter
    /// - Second pass gives each remaining guess letter the earliest
    ///   unconsumed matching target letter (present), otherwise absent
    /// - A target letter is consumed at most once, so repeated guess letters
    ///   never score more than the target holds
    pub fn evaluate(guess: &str, target: &str) -> Option<Vec<LetterResult>> {
        let guess: Vec<char> = guess.to_uppercase().chars().collect();
        let mut target: Vec<Option<char>> = target.to_uppercase().chars().map(Some).collect();

        if guess.len() != target.len() {
            return None;
        }

        let mut result: Vec<LetterResult> = guess
            .iter()
            .map(|&letter| LetterResult {
                letter,
                status: LetterStatus::Absent,
            })
            .collect();

        for (i, &letter) in guess.iter().enumerate() {
            if target[i] == Some(letter) {
                result[i].status = LetterStatus::Correct;
                target[i] = None;
            }
        }

        for (i, &letter) in guess.iter().enumerate() {
            if result[i].status == LetterStatus::Correct {
                continue;
            }
            if let Some(slot) = target.iter_mut().find(|slot| **slot == Some(letter)) {
                result[i].status = LetterStatus::Present;
                *slot = None;
            }
        }

        Some(result)
    }

    /// True when every letter of the result is correct
    pub fn is_solved(result: &[LetterResult]) -> bool {
        !result.is_empty() && result.iter().all(|r| r.status == LetterStatus::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::{Absent, Correct, Present};

    fn statuses(guess: &str, target: &str) -> Vec<LetterStatus> {
        GuessEvaluator::evaluate(guess, target)
            .expect("words should have equal length")
            .into_iter()
            .map(|r| r.status)
            .collect()
    }

    #[test]
    fn test_same_word_is_all_correct() {
        for word in ["HELLO", "crane", "aaaaa", "Speed"] {
            let result = GuessEvaluator::evaluate(word, word).unwrap();
            assert!(GuessEvaluator::is_solved(&result), "{} vs itself", word);
        }
    }

    #[test]
    fn test_length_mismatch_returns_none() {
        assert!(GuessEvaluator::evaluate("HELL", "HELLO").is_none());
        assert!(GuessEvaluator::evaluate("HELLOS", "HELLO").is_none());
        assert!(GuessEvaluator::evaluate("", "HELLO").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            GuessEvaluator::evaluate("hello", "HELLO"),
            GuessEvaluator::evaluate("HELLO", "HELLO")
        );
        assert_eq!(
            GuessEvaluator::evaluate("World", "hello"),
            GuessEvaluator::evaluate("WORLD", "HELLO")
        );
    }

    #[test]
    fn test_letters_are_uppercased() {
        let result = GuessEvaluator::evaluate("world", "hello").unwrap();
        let letters: String = result.iter().map(|r| r.letter).collect();
        assert_eq!(letters, "WORLD");
    }

    #[test]
    fn test_world_against_hello() {
        // O is in HELLO but not at position 1; the L at position 3 is exact
        assert_eq!(
            statuses("WORLD", "HELLO"),
            vec![Absent, Present, Absent, Correct, Absent]
        );
    }

    #[test]
    fn test_llama_against_hello() {
        // HELLO has two L's, both consumed as present
        assert_eq!(
            statuses("LLAMA", "HELLO"),
            vec![Present, Present, Absent, Absent, Absent]
        );
    }

    #[test]
    fn test_speed_against_erase() {
        assert_eq!(
            statuses("SPEED", "ERASE"),
            vec![Present, Absent, Present, Present, Absent]
        );
    }

    #[test]
    fn test_correct_consumes_before_present() {
        // The exact O at position 3 is claimed first, leaving one O for position 1
        assert_eq!(
            statuses("ROBOT", "FLOOR"),
            vec![Present, Present, Absent, Correct, Absent]
        );
        // Only one E in the target; the exact match wins over the earlier guess E
        assert_eq!(
            statuses("EERIE", "THOSE"),
            vec![Absent, Absent, Absent, Absent, Correct]
        );
    }

    #[test]
    fn test_repeated_letters_never_exceed_target_count() {
        let cases = [
            ("AAAAA", "ABBBB"),
            ("LLAMA", "HELLO"),
            ("SPEED", "ERASE"),
            ("EERIE", "THOSE"),
            ("ABBEY", "KEBAB"),
            ("MAMMA", "MADAM"),
        ];

        for (guess, target) in cases {
            let result = GuessEvaluator::evaluate(guess, target).unwrap();
            for letter in guess.chars() {
                let scored = result
                    .iter()
                    .filter(|r| r.letter == letter && r.status != Absent)
                    .count();
                let available = target.chars().filter(|&c| c == letter).count();
                assert!(
                    scored <= available,
                    "{} vs {}: letter {} scored {} times, target has {}",
                    guess,
                    target,
                    letter,
                    scored,
                    available
                );
            }
        }
    }

    #[test]
    fn test_present_prefers_earliest_unconsumed_guess_position() {
        // Guess has three A's, target has two (one exact); the leftover A goes
        // to the earliest non-correct guess position
        assert_eq!(
            statuses("AAAXX", "XAXAX"),
            vec![Present, Correct, Absent, Present, Correct]
        );
    }

    #[test]
    fn test_is_solved_rejects_empty() {
        assert!(!GuessEvaluator::is_solved(&[]));
    }
}
