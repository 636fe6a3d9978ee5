//! Score actions: the transitions of a player's round.
//!
//! ```text
//! Idle(N) --select/modify--> Accumulating --bust--> Idle(N)
//!                                |
//!                                +------bank------> Idle(N+1)
//! ```
//!
//! A round may accumulate indefinitely; only bust and bank end it.

use serde::{Deserialize, Serialize};

use super::bank::bank_round;
use super::calculator::RoundCalculator;
use crate::core::{CardSet, Player};

/// A single scoring step applied to one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreAction {
    /// Claim cards, add modifiers, optionally double.
    SelectCards {
        cards: CardSet,
        modifier_total: u64,
        double_active: bool,
    },
    /// Double and/or add modifiers to the points already in the round.
    ApplyModifiers {
        modifier_total: u64,
        double_active: bool,
    },
    /// Fixed deduction, floored at zero.
    Penalty,
    /// Forfeit the round.
    Bust,
    /// Commit the round.
    Bank,
}

impl ScoreAction {
    /// Compute the player's next state.
    #[must_use]
    pub fn apply(&self, calc: &RoundCalculator, player: &Player) -> Player {
        match *self {
            ScoreAction::SelectCards {
                cards,
                modifier_total,
                double_active,
            } => calc.apply_card_selection(player, cards, modifier_total, double_active),
            ScoreAction::ApplyModifiers {
                modifier_total,
                double_active,
            } => calc.apply_modifiers_only(player, modifier_total, double_active),
            ScoreAction::Penalty => calc.apply_penalty(player),
            ScoreAction::Bust => calc.apply_bust(player),
            ScoreAction::Bank => bank_round(player),
        }
    }

    /// Whether this action ends the current round.
    #[must_use]
    pub fn ends_round(&self) -> bool {
        matches!(self, ScoreAction::Bust | ScoreAction::Bank)
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ScoreAction::SelectCards { .. } => "select_cards",
            ScoreAction::ApplyModifiers { .. } => "apply_modifiers",
            ScoreAction::Penalty => "penalty",
            ScoreAction::Bust => "bust",
            ScoreAction::Bank => "bank",
        }
    }
}

impl std::fmt::Display for ScoreAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
