//! Round score calculator.
//!
//! Every operation takes the current `Player` and returns the next one.
//! Nothing here touches a store.
//!
//! ## Card selection arithmetic
//!
//! Fixed order, not reorderable:
//! 1. sum the selected card values
//! 2. add the modifier total
//! 3. multiply by the doubling factor if doubling is active
//!
//! So `{5, 7}` with `+2` doubled is `(5 + 7 + 2) * 2 = 28`, not `(5 + 7) * 2 + 2`.
//!
//! ## Contract violations
//!
//! Claiming a card already used this round, or passing a modifier total no
//! subset of the modifier deck can produce, is a caller bug. Debug builds
//! panic via `debug_assert!`; release builds compute the result as given
//! (used cards are unioned, the total is added as-is).

use crate::core::{CardSet, Player, ScoringConfig};

/// Applies round arithmetic under a `ScoringConfig`.
#[derive(Clone, Debug, Default)]
pub struct RoundCalculator {
    config: ScoringConfig,
}

impl RoundCalculator {
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Points a card selection adds to the round.
    ///
    /// ```
    /// use flip_scorecard::core::CardSet;
    /// use flip_scorecard::scoring::RoundCalculator;
    ///
    /// let calc = RoundCalculator::default();
    /// let cards = CardSet::from_values([5, 7]).unwrap();
    ///
    /// assert_eq!(calc.card_delta(cards, 2, false), 14);
    /// assert_eq!(calc.card_delta(cards, 2, true), 28);
    /// ```
    #[must_use]
    pub fn card_delta(&self, cards: CardSet, modifier_total: u64, double_active: bool) -> u64 {
        self.debug_check_modifiers(modifier_total);

        let with_modifiers = cards.total().saturating_add(modifier_total);
        self.doubled(with_modifiers, double_active)
    }

    /// Add a card selection to the round and claim its cards.
    ///
    /// An empty selection leaves the player unchanged, whatever the
    /// modifiers and doubling say.
    #[must_use]
    pub fn apply_card_selection(
        &self,
        player: &Player,
        cards: CardSet,
        modifier_total: u64,
        double_active: bool,
    ) -> Player {
        if cards.is_empty() {
            return player.clone();
        }
        debug_assert!(
            cards.is_disjoint(player.used_cards_this_round),
            "selected cards overlap cards already used this round"
        );

        let delta = self.card_delta(cards, modifier_total, double_active);
        Player {
            current_round_score: player.current_round_score.saturating_add(delta),
            used_cards_this_round: player.used_cards_this_round.union(cards),
            ..player.clone()
        }
    }

    /// Double (optionally) the points already in the round, then add modifiers.
    ///
    /// Claims no cards.
    #[must_use]
    pub fn apply_modifiers_only(
        &self,
        player: &Player,
        modifier_total: u64,
        double_active: bool,
    ) -> Player {
        self.debug_check_modifiers(modifier_total);

        let base = self.doubled(player.current_round_score, double_active);
        Player {
            current_round_score: base.saturating_add(modifier_total),
            ..player.clone()
        }
    }

    /// Subtract the penalty from the round, flooring at zero.
    ///
    /// Used cards stay claimed.
    #[must_use]
    pub fn apply_penalty(&self, player: &Player) -> Player {
        Player {
            current_round_score: player.current_round_score.saturating_sub(self.config.penalty),
            ..player.clone()
        }
    }

    /// Void the round: unbanked points are lost and every card is released.
    ///
    /// A bust is not a completed round, so totals, history and the round
    /// number stay put.
    #[must_use]
    pub fn apply_bust(&self, player: &Player) -> Player {
        Player {
            current_round_score: 0,
            used_cards_this_round: CardSet::new(),
            ..player.clone()
        }
    }

    fn doubled(&self, points: u64, double_active: bool) -> u64 {
        if double_active {
            points.saturating_mul(self.config.double_factor)
        } else {
            points
        }
    }

    fn debug_check_modifiers(&self, modifier_total: u64) {
        debug_assert!(
            self.config.is_reachable_modifier_total(modifier_total),
            "modifier total {modifier_total} is not a sum of the modifier deck"
        );
    }
}
