//! Partial player updates.
//!
//! Every mutation the scorecard sends to a store names only the fields it
//! changes on one player. Concurrent writers touching different players
//! never overwrite each other.

use serde::{Deserialize, Serialize};

use crate::core::{CardSet, Player};

/// A set of player fields to merge into a stored record.
///
/// `None` means "leave as is".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round_score: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<Vec<u64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_round_number: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_cards_this_round: Option<CardSet>,
}

impl PlayerUpdate {
    /// Fields that differ between two versions of the same player.
    ///
    /// ```
    /// use flip_scorecard::core::{Player, PlayerId};
    /// use flip_scorecard::store::PlayerUpdate;
    ///
    /// let before = Player::new(PlayerId::new("p1"), "Ada");
    /// let mut after = before.clone();
    /// after.current_round_score = 14;
    ///
    /// let update = PlayerUpdate::diff(&before, &after);
    /// assert_eq!(update.current_round_score, Some(14));
    /// assert_eq!(update.field_names().collect::<Vec<_>>(), vec!["currentRoundScore"]);
    /// ```
    #[must_use]
    pub fn diff(before: &Player, after: &Player) -> Self {
        fn changed<T: PartialEq + Clone>(a: &T, b: &T) -> Option<T> {
            (a != b).then(|| b.clone())
        }

        Self {
            name: changed(&before.name, &after.name),
            total_score: changed(&before.total_score, &after.total_score),
            current_round_score: changed(&before.current_round_score, &after.current_round_score),
            rounds: changed(&before.rounds, &after.rounds),
            current_round_number: changed(&before.current_round_number, &after.current_round_number),
            used_cards_this_round: changed(
                &before.used_cards_this_round,
                &after.used_cards_this_round,
            ),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_names().next().is_none()
    }

    /// Merge the named fields into a player record.
    pub fn apply_to(&self, player: &mut Player) {
        if let Some(name) = &self.name {
            player.name.clone_from(name);
        }
        if let Some(total) = self.total_score {
            player.total_score = total;
        }
        if let Some(current) = self.current_round_score {
            player.current_round_score = current;
        }
        if let Some(rounds) = &self.rounds {
            player.rounds.clone_from(rounds);
        }
        if let Some(number) = self.current_round_number {
            player.current_round_number = number;
        }
        if let Some(used) = self.used_cards_this_round {
            player.used_cards_this_round = used;
        }
    }

    /// Document names of the fields this update sets.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        [
            ("name", self.name.is_some()),
            ("totalScore", self.total_score.is_some()),
            ("currentRoundScore", self.current_round_score.is_some()),
            ("rounds", self.rounds.is_some()),
            ("currentRoundNumber", self.current_round_number.is_some()),
            ("usedCardsThisRound", self.used_cards_this_round.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
    }
}
