//! Game and player identifiers

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const CODE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PLAYER_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const PLAYER_ID_LEN: usize = 20;

/// Short human-shareable join code keying a game document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameCode(String);

impl GameCode {
    /// Random uppercase alphanumeric code
    pub fn generate<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self(random_string(CODE_CHARSET, length, rng))
    }

    /// Normalize user input: trimmed and uppercased
    ///
    /// # Examples
    /// ```
    /// use wordle_battle::game::GameCode;
    ///
    /// assert_eq!(GameCode::parse(" ab12cd ").as_str(), "AB12CD");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self(input.trim().to_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque stable player identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random identity for a client session
    #[must_use]
    pub fn random() -> Self {
        Self(random_string(PLAYER_ID_CHARSET, PLAYER_ID_LEN, &mut rand::rng()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn random_string<R: Rng + ?Sized>(charset: &[u8], length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| char::from(charset[rng.random_range(0..charset.len())]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_code_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let code = GameCode::generate(6, &mut rng);
        assert_eq!(code.as_str().len(), 6);
        assert!(
            code.as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    #[test]
    fn parse_normalizes_case() {
        assert_eq!(GameCode::parse("abc123"), GameCode::parse("ABC123"));
    }

    #[test]
    fn random_player_ids_differ() {
        let a = PlayerId::random();
        let b = PlayerId::random();
        assert_eq!(a.as_str().len(), PLAYER_ID_LEN);
        assert_ne!(a, b);
    }
}
