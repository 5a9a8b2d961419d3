//! Random short key generation.
//!
//! Keys are drawn character by character from a configurable alphabet using a
//! cryptographically secure generator, so they cannot be predicted or
//! enumerated from previously issued keys.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest key the generator will produce. Shorter configured lengths are raised to it.
pub const MIN_KEY_LENGTH: usize = 7;

/// Longest key that fits the `mini_key` column.
pub const MAX_KEY_LENGTH: usize = 32;

/// Default alphabet: digits, upper and lower case ASCII letters.
pub const DEFAULT_ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default requested key length.
pub const DEFAULT_KEY_LENGTH: usize = 8;

/// Invalid key generator configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyGeneratorError {
    #[error("Key alphabet must not be empty")]
    EmptyAlphabet,

    #[error("Key length {length} exceeds the maximum of {max}")]
    KeyTooLong { length: usize, max: usize },
}

/// Produces fixed-length random keys from an alphabet.
///
/// The generator alone does not guarantee uniqueness; two calls may return
/// the same key. Callers reserve keys against the store.
pub struct KeyGenerator {
    alphabet: Vec<char>,
    key_length: usize,
    rng: Mutex<StdRng>,
}

impl KeyGenerator {
    /// Creates a generator for `alphabet` and the requested `key_length`.
    ///
    /// A `key_length` below [`MIN_KEY_LENGTH`] is clamped to it.
    ///
    /// # Errors
    ///
    /// - [`KeyGeneratorError::EmptyAlphabet`] if `alphabet` has no characters
    /// - [`KeyGeneratorError::KeyTooLong`] if `key_length` exceeds [`MAX_KEY_LENGTH`]
    pub fn new(alphabet: &str, key_length: usize) -> Result<Self, KeyGeneratorError> {
        let alphabet: Vec<char> = alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(KeyGeneratorError::EmptyAlphabet);
        }

        if key_length > MAX_KEY_LENGTH {
            return Err(KeyGeneratorError::KeyTooLong {
                length: key_length,
                max: MAX_KEY_LENGTH,
            });
        }

        let effective_length = key_length.max(MIN_KEY_LENGTH);
        if effective_length != key_length {
            tracing::debug!(
                requested = key_length,
                effective = effective_length,
                "Key length raised to minimum"
            );
        }

        Ok(Self {
            alphabet,
            key_length: effective_length,
            rng: Mutex::new(StdRng::from_os_rng()),
        })
    }

    /// Generator with [`DEFAULT_ALPHABET`] and [`DEFAULT_KEY_LENGTH`].
    pub fn with_defaults() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            key_length: DEFAULT_KEY_LENGTH,
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Returns a new random key of exactly [`Self::key_length`] characters.
    pub fn generate_key(&self) -> String {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..self.key_length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }

    /// Effective key length after clamping.
    pub fn key_length(&self) -> usize {
        self.key_length
    }
}

impl std::fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGenerator")
            .field("alphabet_len", &self.alphabet.len())
            .field("key_length", &self.key_length)
            .finish_non_exhaustive()
    }
}
