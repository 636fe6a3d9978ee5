//! # flip-scorecard
//!
//! A shared live scorecard for Flip 7 style card games.
//!
//! Players join a session through a shared link, record their round scores
//! with simple card arithmetic, and everyone watches the same leaderboard
//! update as scores change.
//!
//! ## Design Principles
//!
//! 1. **Pure Scoring**: Every scoring rule is a function from the current
//!    `Player` to the next one. No I/O, no locks, safe from any thread.
//!
//! 2. **Store as a Capability**: Persistence and fan-out sit behind the
//!    `SessionStore` trait. Scoring never knows which store is in use.
//!
//! 3. **Partial Updates**: Each mutation names only the fields of one
//!    player it changes, so players scoring at the same time never clobber
//!    each other.
//!
//! ## Round Arithmetic
//!
//! Cards, then modifiers, then doubling: `(cards + modifiers) * 2`.
//! A penalty takes 15 off the round (never below zero). A bust voids the
//! round. Banking moves the round score into the player's history.
//!
//! ## Modules
//!
//! - `core`: cards, players, sessions, configuration, id generation
//! - `scoring`: round calculator, banking, leaderboard ranking
//! - `selection`: per-viewer pending selection
//! - `store`: session store trait, partial updates, in-memory store
//! - `scorecard`: scoring wired to a store
//! - `error`: error types

pub mod core;
pub mod scoring;
pub mod selection;
pub mod store;
pub mod scorecard;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardSet, CardValue,
    Player, PlayerId, RoundPhase,
    GameSession, SessionId,
    ScoringConfig, StoreConfig,
    IdRng,
};

pub use crate::scoring::{
    RoundCalculator, ScoreAction, bank_round,
    rank_players, standing_order, Leaderboard, Standing,
};

pub use crate::selection::{PendingSelection, Preview};

pub use crate::store::{
    SessionStore, SessionCallback, PlayerUpdate, Subscription, InMemoryStore,
};

pub use crate::scorecard::Scorecard;

pub use crate::error::{InvariantViolation, ScorecardError};
