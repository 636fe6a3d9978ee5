//! Banking: commit the round in progress to the player's history.

use crate::core::{CardSet, Player};

/// Commit the current round.
///
/// Adds the round score to the total, appends it to `rounds`, advances the
/// round number and releases every claimed card. Banking a zero round is
/// well-defined (it records a 0 entry); refusing it is the caller's call.
///
/// ```
/// use flip_scorecard::core::{Player, PlayerId};
/// use flip_scorecard::scoring::bank_round;
///
/// let mut player = Player::new(PlayerId::new("p1"), "Ada");
/// player.current_round_score = 6;
///
/// let banked = bank_round(&player);
/// assert_eq!(banked.total_score, 6);
/// assert_eq!(banked.rounds, vec![6]);
/// assert_eq!(banked.current_round_number, 2);
/// ```
#[must_use]
pub fn bank_round(player: &Player) -> Player {
    let round_score = player.current_round_score;

    let mut rounds = player.rounds.clone();
    rounds.push(round_score);

    Player {
        total_score: player.total_score.saturating_add(round_score),
        current_round_score: 0,
        rounds,
        current_round_number: player.current_round_number.saturating_add(1),
        used_cards_this_round: CardSet::new(),
        ..player.clone()
    }
}
