//! Secret word selection
//!
//! Draws the per-round secret words for a game: unique within the batch,
//! uniformly at random, and always accepted by the validator.

use super::WordValidator;
use crate::core::Word;
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use tracing::warn;

/// Curated list of words eligible to be secrets
#[derive(Debug, Clone, Default)]
pub struct SecretWordSource {
    words: Vec<Word>,
}

impl SecretWordSource {
    /// Build a source from candidate secrets
    ///
    /// Duplicates are removed and any word the validator would reject is
    /// dropped, so every drawn secret is independently a valid guess.
    pub fn new(candidates: impl IntoIterator<Item = Word>, validator: &WordValidator) -> Self {
        let mut seen = FxHashSet::default();
        let mut words = Vec::new();
        let mut rejected = 0usize;

        for word in candidates {
            if !validator.is_valid(word.text()) {
                rejected += 1;
                continue;
            }
            if seen.insert(word.text().to_owned()) {
                words.push(word);
            }
        }

        if rejected > 0 {
            warn!(rejected, "secret candidates missing from the accepted list");
        }

        Self { words }
    }

    /// Draw `count` unique secrets using the thread-local RNG
    ///
    /// If `count` exceeds the number of distinct secrets, every secret is
    /// returned once (in random order) instead of failing.
    #[must_use]
    pub fn draw_secrets(&self, count: usize) -> Vec<Word> {
        self.draw_secrets_with(count, &mut rand::rng())
    }

    /// Draw `count` unique secrets with a caller-supplied RNG
    pub fn draw_secrets_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Word> {
        if count > self.words.len() {
            warn!(
                requested = count,
                available = self.words.len(),
                "not enough distinct secrets, returning all of them"
            );
        }

        self.words.choose_multiple(rng, count).cloned().collect()
    }

    /// Whether `word` can be drawn as a secret
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.words.iter().any(|w| w.text() == word)
    }

    /// Number of distinct eligible secrets
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn source(secrets: &[&str], allowed: &[&str]) -> SecretWordSource {
        let allowed = words_from_slice(allowed, 5);
        let validator = WordValidator::new(&allowed);
        SecretWordSource::new(words_from_slice(secrets, 5), &validator)
    }

    #[test]
    fn drops_secrets_the_validator_rejects() {
        let source = source(&["crane", "slate", "zzzzz"], &["crane", "slate"]);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn drops_duplicate_secrets() {
        let source = source(&["crane", "crane", "slate"], &["crane", "slate"]);
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn draws_are_unique() {
        let list = ["crane", "slate", "mango", "allow", "audio", "vital", "robot"];
        let source = source(&list, &list);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let drawn = source.draw_secrets_with(5, &mut rng);
            assert_eq!(drawn.len(), 5);
            let unique: FxHashSet<&str> = drawn.iter().map(Word::text).collect();
            assert_eq!(unique.len(), 5);
        }
    }

    #[test]
    fn oversized_request_returns_every_secret_once() {
        let source = source(&["crane", "slate"], &["crane", "slate"]);
        let mut drawn: Vec<String> = source
            .draw_secrets(5)
            .into_iter()
            .map(|w| w.text().to_owned())
            .collect();
        drawn.sort();
        assert_eq!(drawn, ["crane", "slate"]);
    }

    #[test]
    fn contains_ignores_case() {
        let source = source(&["crane"], &["crane", "slate"]);
        assert!(source.contains(" CRANE"));
        assert!(!source.contains("slate"));
    }

    #[test]
    fn zero_count_draws_nothing() {
        let source = source(&["crane"], &["crane"]);
        assert!(source.draw_secrets(0).is_empty());
    }
}
