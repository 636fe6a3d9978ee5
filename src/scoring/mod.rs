//! Round scoring and leaderboard ranking.
//!
//! All functions here are pure: they take a player (or players) and return
//! new values. Callers decide what to persist.

pub mod calculator;
pub mod bank;
pub mod ranking;
pub mod action;

pub use calculator::RoundCalculator;
pub use bank::bank_round;
pub use ranking::{rank_players, standing_order, Leaderboard, Standing};
pub use action::ScoreAction;
