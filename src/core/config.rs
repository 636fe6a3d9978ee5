//! Scorecard configuration.
//!
//! - `ScoringConfig`: penalty size, modifier deck, doubling factor
//! - `StoreConfig`: id length and optional seed for the in-memory store
//!
//! Defaults match the printed card game. Both structs follow the same
//! builder pattern: start from `Default` and chain `with_*` calls.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Point values of the modifier cards in the standard deck.
pub const STANDARD_MODIFIERS: [u64; 5] = [2, 4, 6, 8, 10];

/// Most modifier cards a deck may hold.
pub const MAX_MODIFIER_DECK: usize = 16;

/// Rules for round arithmetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points removed by a penalty (default: 15). The round score floors at 0.
    pub penalty: u64,

    /// Modifier card values (default: +2, +4, +6, +8, +10).
    /// Each can be toggled on at most once per pending selection.
    pub modifier_deck: SmallVec<[u64; 5]>,

    /// Multiplier applied by the doubling card (default: 2).
    pub double_factor: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty: 15,
            modifier_deck: SmallVec::from_slice(&STANDARD_MODIFIERS),
            double_factor: 2,
        }
    }
}

impl ScoringConfig {
    /// Set the penalty size.
    #[must_use]
    pub fn with_penalty(mut self, penalty: u64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Replace the modifier deck.
    ///
    /// # Panics
    ///
    /// Panics if the deck holds more than `MAX_MODIFIER_DECK` cards.
    #[must_use]
    pub fn with_modifier_deck(mut self, deck: &[u64]) -> Self {
        assert!(
            deck.len() <= MAX_MODIFIER_DECK,
            "Modifier deck holds at most {MAX_MODIFIER_DECK} cards"
        );
        self.modifier_deck = SmallVec::from_slice(deck);
        self
    }

    /// Set the doubling multiplier.
    #[must_use]
    pub fn with_double_factor(mut self, factor: u64) -> Self {
        self.double_factor = factor;
        self
    }

    /// Check if a value is one of the modifier cards.
    #[must_use]
    pub fn is_modifier(&self, value: u64) -> bool {
        self.modifier_deck.contains(&value)
    }

    /// Check if `total` is the sum of some subset of the modifier deck.
    ///
    /// ```
    /// use flip_scorecard::core::ScoringConfig;
    ///
    /// let config = ScoringConfig::default();
    /// assert!(config.is_reachable_modifier_total(0));
    /// assert!(config.is_reachable_modifier_total(12)); // 2 + 10
    /// assert!(config.is_reachable_modifier_total(30)); // whole deck
    /// assert!(!config.is_reachable_modifier_total(3));
    /// assert!(!config.is_reachable_modifier_total(32));
    /// ```
    #[must_use]
    pub fn is_reachable_modifier_total(&self, total: u64) -> bool {
        let deck = &self.modifier_deck[..self.modifier_deck.len().min(MAX_MODIFIER_DECK)];
        (0u32..1 << deck.len()).any(|mask| {
            deck.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .try_fold(0u64, |sum, (_, &value)| sum.checked_add(value))
                == Some(total)
        })
    }
}

/// Settings for the bundled in-memory session store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Length of generated session tokens (default: 7).
    pub session_id_len: usize,

    /// Seed for id generation. `None` seeds from OS entropy.
    /// Set a seed for reproducible ids in tests.
    pub seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            session_id_len: 7,
            seed: None,
        }
    }
}

impl StoreConfig {
    /// Use a fixed seed for id generation.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the session token length.
    #[must_use]
    pub fn with_session_id_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Session id length must be positive");
        self.session_id_len = len;
        self
    }
}
