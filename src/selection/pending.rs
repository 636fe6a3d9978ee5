//! Pending selection: what a viewer has toggled but not yet saved.
//!
//! This is per-viewer scratch state. It is never written to the store;
//! only the `ScoreAction` it resolves to is.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{CardSet, CardValue, Player, ScoringConfig};
use crate::error::ScorecardError;
use crate::scoring::{RoundCalculator, ScoreAction};

/// What saving the current selection would do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preview {
    /// Cards are selected: they and any modifiers are added to the round.
    Cards { delta: u64, new_round_score: u64 },
    /// No cards, but modifiers or doubling apply to the existing round score.
    Modifiers { new_round_score: u64 },
}

impl Preview {
    #[must_use]
    pub const fn new_round_score(self) -> u64 {
        match self {
            Preview::Cards { new_round_score, .. } | Preview::Modifiers { new_round_score } => {
                new_round_score
            }
        }
    }
}

/// Cards, modifiers and the doubling toggle chosen before saving.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    cards: CardSet,
    /// Active modifiers in the order they were toggled on.
    modifiers: SmallVec<[u64; 5]>,
    double_active: bool,
}

impl PendingSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a card. Cards already used this round cannot be selected;
    /// toggling one is a no-op.
    ///
    /// Returns true if the card is selected afterwards.
    pub fn toggle_card(&mut self, card: CardValue, used: CardSet) -> bool {
        if used.contains(card) {
            return false;
        }
        self.cards.toggle(card)
    }

    /// Toggle a modifier card on or off. Modifiers never stack.
    ///
    /// Returns true if the modifier is active afterwards.
    pub fn toggle_modifier(
        &mut self,
        value: u64,
        config: &ScoringConfig,
    ) -> Result<bool, ScorecardError> {
        if !config.is_modifier(value) {
            return Err(ScorecardError::UnknownModifier(value));
        }

        if let Some(pos) = self.modifiers.iter().position(|&m| m == value) {
            self.modifiers.remove(pos);
            Ok(false)
        } else {
            self.modifiers.push(value);
            Ok(true)
        }
    }

    /// Flip the doubling card. Returns the new state.
    pub fn toggle_double(&mut self) -> bool {
        self.double_active = !self.double_active;
        self.double_active
    }

    #[must_use]
    pub fn cards(&self) -> CardSet {
        self.cards
    }

    #[must_use]
    pub fn modifiers(&self) -> &[u64] {
        &self.modifiers
    }

    #[must_use]
    pub fn double_active(&self) -> bool {
        self.double_active
    }

    #[must_use]
    pub fn cards_total(&self) -> u64 {
        self.cards.total()
    }

    #[must_use]
    pub fn modifier_total(&self) -> u64 {
        self.modifiers.iter().sum()
    }

    #[must_use]
    pub fn has_cards(&self) -> bool {
        !self.cards.is_empty()
    }

    #[must_use]
    pub fn has_modifiers_or_double(&self) -> bool {
        !self.modifiers.is_empty() || self.double_active
    }

    /// Drop selected cards that a newer snapshot shows as used.
    ///
    /// Returns the cards that were dropped.
    pub fn retain_available(&mut self, used: CardSet) -> CardSet {
        let mut dropped = CardSet::new();
        for card in used.iter() {
            if self.cards.remove(card) {
                dropped.insert(card);
            }
        }
        dropped
    }

    /// Resolve the selection against the player's latest record.
    ///
    /// - cards selected: `SelectCards`
    /// - no cards, modifiers or doubling active, points in the round:
    ///   `ApplyModifiers`
    /// - otherwise nothing to save
    #[must_use]
    pub fn to_action(&self, player: &Player) -> Option<ScoreAction> {
        if self.has_cards() {
            Some(ScoreAction::SelectCards {
                cards: self.cards,
                modifier_total: self.modifier_total(),
                double_active: self.double_active,
            })
        } else if self.has_modifiers_or_double() && player.current_round_score > 0 {
            Some(ScoreAction::ApplyModifiers {
                modifier_total: self.modifier_total(),
                double_active: self.double_active,
            })
        } else {
            None
        }
    }

    /// What saving would do, without doing it.
    #[must_use]
    pub fn preview(&self, calc: &RoundCalculator, player: &Player) -> Option<Preview> {
        let action = self.to_action(player)?;
        let next = action.apply(calc, player);
        Some(match action {
            ScoreAction::SelectCards { .. } => Preview::Cards {
                delta: next.current_round_score - player.current_round_score,
                new_round_score: next.current_round_score,
            },
            _ => Preview::Modifiers {
                new_round_score: next.current_round_score,
            },
        })
    }

    /// Reset cards, modifiers and doubling.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.modifiers.clear();
        self.double_active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn card(v: u8) -> CardValue {
        CardValue::new(v).unwrap()
    }

    fn player_with(score: u64, used: &[u8]) -> Player {
        let mut p = Player::new(PlayerId::new("p1"), "Ada");
        p.current_round_score = score;
        p.used_cards_this_round = CardSet::from_values(used.iter().copied()).unwrap();
        p
    }

    #[test]
    fn test_toggle_card() {
        let mut sel = PendingSelection::new();
        assert!(sel.toggle_card(card(5), CardSet::new()));
        assert!(sel.toggle_card(card(7), CardSet::new()));
        assert_eq!(sel.cards_total(), 12);

        assert!(!sel.toggle_card(card(5), CardSet::new()));
        assert_eq!(sel.cards_total(), 7);
    }

    #[test]
    fn test_used_card_cannot_be_selected() {
        let mut sel = PendingSelection::new();
        let used = CardSet::from_values([5, 7]).unwrap();

        assert!(!sel.toggle_card(card(5), used));
        assert!(!sel.has_cards());
    }

    #[test]
    fn test_toggle_modifier() {
        let config = ScoringConfig::default();
        let mut sel = PendingSelection::new();

        assert!(sel.toggle_modifier(10, &config).unwrap());
        assert!(sel.toggle_modifier(2, &config).unwrap());
        assert_eq!(sel.modifiers(), &[10, 2]);
        assert_eq!(sel.modifier_total(), 12);

        // Toggling again turns it off rather than stacking.
        assert!(!sel.toggle_modifier(10, &config).unwrap());
        assert_eq!(sel.modifier_total(), 2);

        assert!(matches!(
            sel.toggle_modifier(3, &config),
            Err(ScorecardError::UnknownModifier(3))
        ));
    }

    #[test]
    fn test_to_action_with_cards() {
        let mut sel = PendingSelection::new();
        sel.toggle_card(card(3), CardSet::new());
        sel.toggle_double();

        let action = sel.to_action(&player_with(0, &[]));
        assert_eq!(
            action,
            Some(ScoreAction::SelectCards {
                cards: CardSet::from_values([3]).unwrap(),
                modifier_total: 0,
                double_active: true,
            })
        );
    }

    #[test]
    fn test_to_action_modifiers_need_points() {
        let config = ScoringConfig::default();
        let mut sel = PendingSelection::new();
        sel.toggle_modifier(4, &config).unwrap();

        assert_eq!(sel.to_action(&player_with(0, &[])), None);
        assert_eq!(
            sel.to_action(&player_with(10, &[])),
            Some(ScoreAction::ApplyModifiers {
                modifier_total: 4,
                double_active: false,
            })
        );
    }

    #[test]
    fn test_empty_selection_has_no_action() {
        let sel = PendingSelection::new();
        assert_eq!(sel.to_action(&player_with(20, &[])), None);
        assert_eq!(sel.preview(&RoundCalculator::default(), &player_with(20, &[])), None);
    }

    #[test]
    fn test_preview() {
        let config = ScoringConfig::default();
        let calc = RoundCalculator::default();

        let mut sel = PendingSelection::new();
        sel.toggle_card(card(5), CardSet::new());
        sel.toggle_card(card(7), CardSet::new());
        sel.toggle_modifier(2, &config).unwrap();

        assert_eq!(
            sel.preview(&calc, &player_with(6, &[])),
            Some(Preview::Cards {
                delta: 14,
                new_round_score: 20
            })
        );

        let mut mods = PendingSelection::new();
        mods.toggle_double();
        mods.toggle_modifier(6, &config).unwrap();
        let preview = mods.preview(&calc, &player_with(10, &[1]));
        assert_eq!(preview, Some(Preview::Modifiers { new_round_score: 26 }));
        assert_eq!(preview.map(Preview::new_round_score), Some(26));
    }

    #[test]
    fn test_retain_available() {
        let mut sel = PendingSelection::new();
        sel.toggle_card(card(2), CardSet::new());
        sel.toggle_card(card(9), CardSet::new());

        let dropped = sel.retain_available(CardSet::from_values([9, 11]).unwrap());
        assert_eq!(dropped, CardSet::from_values([9]).unwrap());
        assert_eq!(sel.cards(), CardSet::from_values([2]).unwrap());
    }

    #[test]
    fn test_clear() {
        let config = ScoringConfig::default();
        let mut sel = PendingSelection::new();
        sel.toggle_card(card(2), CardSet::new());
        sel.toggle_modifier(8, &config).unwrap();
        sel.toggle_double();

        sel.clear();
        assert_eq!(sel, PendingSelection::new());
        assert!(!sel.double_active());
    }
}
