//! Property tests for round scoring and ranking (pure, no store).

use proptest::prelude::*;

use flip_scorecard::core::{CardSet, Player, PlayerId, STANDARD_MODIFIERS};
use flip_scorecard::scoring::{bank_round, rank_players, RoundCalculator};

fn card_set() -> impl Strategy<Value = CardSet> {
    proptest::collection::btree_set(1u8..=12, 0..=12)
        .prop_map(|values| CardSet::from_values(values).unwrap())
}

/// Sum of a random subset of the standard modifier deck.
fn modifier_total() -> impl Strategy<Value = u64> {
    proptest::collection::vec(any::<bool>(), STANDARD_MODIFIERS.len()).prop_map(|picks| {
        picks
            .iter()
            .zip(STANDARD_MODIFIERS)
            .filter(|(picked, _)| **picked)
            .map(|(_, value)| value)
            .sum()
    })
}

/// A player with a consistent banked history and some round in progress.
fn player() -> impl Strategy<Value = Player> {
    (
        "[a-z]{1,6}",
        proptest::collection::vec(0u64..200, 0..8),
        0u64..200,
        card_set(),
    )
        .prop_map(|(id, rounds, current, used)| {
            let mut p = Player::new(PlayerId::new(id.clone()), id);
            p.total_score = rounds.iter().sum();
            p.current_round_number = rounds.len() as u32 + 1;
            p.rounds = rounds;
            p.current_round_score = current;
            p.used_cards_this_round = used;
            p
        })
}

proptest! {
    /// Property: card delta is (cards + modifiers) * (2 if doubled); an
    /// empty selection scores nothing.
    #[test]
    fn prop_card_delta_formula(
        cards in card_set(),
        modifiers in modifier_total(),
        double in any::<bool>(),
    ) {
        let calc = RoundCalculator::default();
        let expected = (cards.total() + modifiers) * if double { 2 } else { 1 };
        prop_assert_eq!(calc.card_delta(cards, modifiers, double), expected);

        let start = Player::new(PlayerId::new("p"), "P");
        let next = calc.apply_card_selection(&start, cards, modifiers, double);
        let scored = if cards.is_empty() { 0 } else { expected };
        prop_assert_eq!(next.current_round_score, scored);
        prop_assert_eq!(next.used_cards_this_round, cards);
    }

    /// Property: penalty result is max(0, s - 15) and keeps used cards.
    #[test]
    fn prop_penalty_floors_at_zero(p in player()) {
        let calc = RoundCalculator::default();
        let next = calc.apply_penalty(&p);

        prop_assert_eq!(next.current_round_score, p.current_round_score.saturating_sub(15));
        prop_assert_eq!(next.used_cards_this_round, p.used_cards_this_round);
        prop_assert_eq!(next.total_score, p.total_score);
    }

    /// Property: bust clears the round only, and is idempotent.
    #[test]
    fn prop_bust_idempotent(p in player()) {
        let calc = RoundCalculator::default();
        let once = calc.apply_bust(&p);
        let twice = calc.apply_bust(&once);

        prop_assert_eq!(once.current_round_score, 0);
        prop_assert!(once.used_cards_this_round.is_empty());
        prop_assert_eq!(&once.rounds, &p.rounds);
        prop_assert_eq!(once.total_score, p.total_score);
        prop_assert_eq!(once.current_round_number, p.current_round_number);
        prop_assert_eq!(once, twice);
    }

    /// Property: banking keeps total == sum(rounds) and appends the round.
    #[test]
    fn prop_bank_preserves_invariants(p in player()) {
        prop_assert!(p.check_invariants().is_ok());

        let banked = bank_round(&p);
        prop_assert_eq!(banked.total_score, p.total_score + p.current_round_score);
        prop_assert_eq!(banked.rounds.last().copied(), Some(p.current_round_score));
        prop_assert_eq!(&banked.rounds[..p.rounds.len()], &p.rounds[..]);
        prop_assert!(banked.check_invariants().is_ok());
    }

    /// Property: higher total always ranks first; ties go to fewer rounds.
    #[test]
    fn prop_ranking_order(players in proptest::collection::vec(player(), 0..10)) {
        let ranked = rank_players(&players);
        prop_assert_eq!(ranked.len(), players.len());

        for pair in ranked.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.total_score >= b.total_score);
            if a.total_score == b.total_score {
                prop_assert!(a.rounds.len() <= b.rounds.len());
            }
        }
    }

    /// Property: changing a non-score field leaves the ranking unchanged.
    #[test]
    fn prop_ranking_ignores_round_score(
        players in proptest::collection::vec(player(), 1..10),
        bump in 0u64..100,
    ) {
        let before: Vec<_> = rank_players(&players).iter().map(|p| p.id.clone()).collect();

        let mut changed = players.clone();
        changed[0].current_round_score += bump;
        let after: Vec<_> = rank_players(&changed).iter().map(|p| p.id.clone()).collect();

        prop_assert_eq!(before, after);
    }
}
