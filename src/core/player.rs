//! Player identification and per-player score record.
//!
//! ## PlayerId
//!
//! Opaque session-unique identifier assigned at join time.
//!
//! ## Player
//!
//! The persisted per-player document. Field names serialize in camelCase so
//! a stored record reads `totalScore`, `currentRoundScore`, and so on.
//!
//! Invariants (see [`Player::check_invariants`]):
//! - `total_score == rounds.iter().sum()`
//! - `current_round_number == rounds.len() + 1`
//! - `name` is non-empty after trimming

use serde::{Deserialize, Serialize};

use super::card::CardSet;
use crate::error::{InvariantViolation, ScorecardError};

/// Opaque player identifier, stable for the session's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wrap an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Trim a display name, rejecting names that are empty once trimmed.
///
/// ```
/// use flip_scorecard::core::normalize_name;
///
/// assert_eq!(normalize_name("  Ada ").unwrap(), "Ada");
/// assert!(normalize_name("   ").is_err());
/// ```
pub fn normalize_name(raw: &str) -> Result<String, ScorecardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScorecardError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Where a player is within the current round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Nothing scored or claimed yet in this round.
    Idle { round: u32 },
    /// Points or claimed cards are pending in this round.
    Accumulating { round: u32 },
}

impl RoundPhase {
    /// Round number this phase belongs to.
    #[must_use]
    pub const fn round(self) -> u32 {
        match self {
            RoundPhase::Idle { round } | RoundPhase::Accumulating { round } => round,
        }
    }
}

/// A player's score record within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    pub name: String,

    /// Sum of all banked rounds.
    pub total_score: u64,

    /// Points accumulated in the round in progress, not yet banked.
    pub current_round_score: u64,

    /// Banked round scores, oldest first. Append-only.
    pub rounds: Vec<u64>,

    /// Always `rounds.len() + 1`.
    pub current_round_number: u32,

    /// Base cards already claimed this round.
    pub used_cards_this_round: CardSet,
}

impl Player {
    /// Create a freshly joined player with an empty record.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            total_score: 0,
            current_round_score: 0,
            rounds: Vec::new(),
            current_round_number: 1,
            used_cards_this_round: CardSet::new(),
        }
    }

    /// Number of banked rounds.
    #[must_use]
    pub fn completed_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Banked rounds as `(round number, score)` pairs, oldest first.
    pub fn round_history(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.rounds
            .iter()
            .enumerate()
            .map(|(i, &score)| (i as u32 + 1, score))
    }

    /// Whether there is anything to bank.
    #[must_use]
    pub fn can_bank(&self) -> bool {
        self.current_round_score > 0
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        let round = self.current_round_number;
        if self.current_round_score == 0 && self.used_cards_this_round.is_empty() {
            RoundPhase::Idle { round }
        } else {
            RoundPhase::Accumulating { round }
        }
    }

    /// Verify the record against the data-model rules.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.name.trim().is_empty() {
            return Err(InvariantViolation::EmptyName);
        }

        let banked: u64 = self.rounds.iter().sum();
        if banked != self.total_score {
            return Err(InvariantViolation::TotalMismatch {
                total: self.total_score,
                banked,
            });
        }

        let expected = self.rounds.len() as u32 + 1;
        if self.current_round_number != expected {
            return Err(InvariantViolation::RoundNumberMismatch {
                expected,
                actual: self.current_round_number,
            });
        }

        Ok(())
    }
}
