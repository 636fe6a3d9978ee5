//! Error types.
//!
//! - `InvariantViolation`: a player or session record breaks a data-model rule.
//! - `ScorecardError`: a scorecard operation was refused. Refusals never
//!   mutate the session.

use thiserror::Error;

use crate::core::{PlayerId, SessionId};

/// A data-model rule that a record fails to satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("card value {0} is outside 1..=12")]
    CardOutOfRange(u8),

    #[error("total score {total} does not equal the sum of banked rounds {banked}")]
    TotalMismatch { total: u64, banked: u64 },

    #[error("round number is {actual}, expected {expected} from the banked rounds")]
    RoundNumberMismatch { expected: u32, actual: u32 },

    #[error("player name is empty")]
    EmptyName,

    #[error("player keyed as {key} carries id {id}")]
    KeyMismatch { key: PlayerId, id: PlayerId },
}

/// Why a scorecard operation was refused.
#[derive(Debug, Error)]
pub enum ScorecardError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("player {player} not found in session {session}")]
    PlayerNotFound { session: SessionId, player: PlayerId },

    #[error("no cards selected")]
    EmptySelection,

    #[error("no modifiers or doubling to apply")]
    NothingToApply,

    #[error("nothing to bank this round")]
    NothingToBank,

    #[error("modifier +{0} is not in the modifier deck")]
    UnknownModifier(u64),

    #[error("modifier total {0} cannot be made from the modifier deck")]
    InvalidModifierTotal(u64),

    #[error("card {0} was already claimed this round")]
    CardAlreadyUsed(u8),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}
