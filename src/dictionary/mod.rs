use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::{rngs::StdRng, seq::IndexedRandom};
use tokio::fs;

use crate::error::CorpusError;

/// Read access to the validation and target word sets.
///
/// Words are stored lower case; lookups are case-insensitive.
pub trait WordCorpus: Send + Sync {
    /// Check if a word is in the validation set
    fn contains(&self, word: &str) -> bool;

    /// Pick a target word uniformly at random, `None` if there are none
    fn random_target(&self) -> Option<String>;

    /// Pick a target word of exactly `length` letters, `None` if there are none
    fn random_target_of_length(&self, length: usize) -> Option<String>;

    /// Pick a validation word uniformly at random, `None` if there are none
    fn random_valid_word(&self) -> Option<String>;

    fn words_of_length(&self, length: usize) -> Vec<String>;

    fn target_words_of_length(&self, length: usize) -> Vec<String>;

    /// Number of validation words
    fn size(&self) -> usize;

    /// Number of target words
    fn target_size(&self) -> usize;
}

/// Files a word list is loaded from
#[derive(Debug, Clone)]
pub struct WordSources {
    pub valid_path: PathBuf,
    pub target_path: PathBuf,
}

/// One consistent view of both word sets
#[derive(Debug, Default)]
struct Snapshot {
    valid_words: Vec<String>,
    valid_set: HashSet<String>,
    target_words: Vec<String>,
}

impl Snapshot {
    fn parse(valid: &str, target: &str) -> Self {
        let valid_words = normalize_lines(valid);
        let valid_set = valid_words.iter().cloned().collect();
        Self {
            valid_words,
            valid_set,
            target_words: normalize_lines(target),
        }
    }

    /// Target words that would fail their own validation check
    fn missing_targets(&self) -> Vec<String> {
        self.target_words
            .iter()
            .filter(|word| !self.valid_set.contains(*word))
            .cloned()
            .collect()
    }

    /// Fail if any target word is missing from the validation list
    fn ensure_consistent(&self) -> Result<(), CorpusError> {
        let missing = self.missing_targets();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CorpusError::Inconsistent { missing })
        }
    }

    /// Log target words missing from the validation list
    fn warn_inconsistent(&self) {
        if let Err(CorpusError::Inconsistent { missing }) = self.ensure_consistent() {
            tracing::warn!(
                "{} target word(s) are not in the validation list, e.g. '{}'",
                missing.len(),
                missing[0]
            );
        }
    }
}

fn normalize_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

async fn read_source(path: &Path) -> Result<String, CorpusError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| CorpusError::Read {
            path: path.to_path_buf(),
            source,
        })
}

/// Word list backed by two line-oriented files.
///
/// Both sets live in a single snapshot that is swapped as a unit on reload,
/// so readers never see validation and target words from different loads.
pub struct WordList {
    snapshot: RwLock<Arc<Snapshot>>,
    sources: Option<WordSources>,
    strict: bool,
    rng: Mutex<StdRng>,
}

impl WordList {
    /// Load both word files.
    ///
    /// With `strict` set, a target word missing from the validation list is
    /// an error; otherwise it is only logged.
    pub async fn load(sources: WordSources, strict: bool, rng: StdRng) -> Result<Self, CorpusError> {
        let snapshot = Self::read_snapshot(&sources, strict).await?;

        Ok(Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            sources: Some(sources),
            strict,
            rng: Mutex::new(rng),
        })
    }

    /// Build a word list from in-memory text (no reload support)
    pub fn from_sources(valid: &str, target: &str, rng: StdRng) -> Self {
        let snapshot = Snapshot::parse(valid, target);
        snapshot.warn_inconsistent();

        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            sources: None,
            strict: false,
            rng: Mutex::new(rng),
        }
    }

    /// Create an empty word list (for testing)
    pub fn empty(rng: StdRng) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            sources: None,
            strict: false,
            rng: Mutex::new(rng),
        }
    }

    /// Re-read both files and replace the current words.
    ///
    /// On failure the previous words stay in place.
    pub async fn reload(&self) -> Result<(), CorpusError> {
        let sources = self.sources.as_ref().ok_or(CorpusError::NoSources)?;
        let snapshot = Self::read_snapshot(sources, self.strict).await?;

        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
        Ok(())
    }

    /// Whether there is anything to pick a game's target from
    pub fn is_empty(&self) -> bool {
        self.current().target_words.is_empty()
    }

    async fn read_snapshot(sources: &WordSources, strict: bool) -> Result<Snapshot, CorpusError> {
        let valid = read_source(&sources.valid_path).await?;
        let target = read_source(&sources.target_path).await?;
        let snapshot = Snapshot::parse(&valid, &target);

        if strict {
            snapshot.ensure_consistent()?;
        } else {
            snapshot.warn_inconsistent();
        }

        tracing::info!(
            "Loaded {} validation words from {} and {} target words from {}",
            snapshot.valid_words.len(),
            sources.valid_path.display(),
            snapshot.target_words.len(),
            sources.target_path.display()
        );

        Ok(snapshot)
    }

    fn current(&self) -> Arc<Snapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn pick(&self, words: &[String]) -> Option<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        words.choose(&mut *rng).cloned()
    }
}

impl WordCorpus for WordList {
    fn contains(&self, word: &str) -> bool {
        self.current().valid_set.contains(&word.to_lowercase())
    }

    fn random_target(&self) -> Option<String> {
        let snapshot = self.current();
        self.pick(&snapshot.target_words)
    }

    fn random_target_of_length(&self, length: usize) -> Option<String> {
        self.pick(&self.target_words_of_length(length))
    }

    fn random_valid_word(&self) -> Option<String> {
        let snapshot = self.current();
        self.pick(&snapshot.valid_words)
    }

    fn words_of_length(&self, length: usize) -> Vec<String> {
        self.current()
            .valid_words
            .iter()
            .filter(|word| word.chars().count() == length)
            .cloned()
            .collect()
    }

    fn target_words_of_length(&self, length: usize) -> Vec<String> {
        self.current()
            .target_words
            .iter()
            .filter(|word| word.chars().count() == length)
            .cloned()
            .collect()
    }

    fn size(&self) -> usize {
        self.current().valid_words.len()
    }

    fn target_size(&self) -> usize {
        self.current().target_words.len()
    }
}
