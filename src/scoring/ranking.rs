//! Leaderboard ordering.
//!
//! Players rank by:
//! 1. total score, highest first
//! 2. completed rounds, fewest first
//! 3. input order (stable sort)
//!
//! The order is recomputed from each snapshot, never maintained
//! incrementally. [`Leaderboard::from_session`] feeds players sorted by id so
//! the third key is deterministic for a given session.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::{GameSession, Player, PlayerId};

/// Comparator for leaderboard order.
#[must_use]
pub fn standing_order(a: &Player, b: &Player) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| a.completed_rounds().cmp(&b.completed_rounds()))
}

/// Rank players. Ties on both keys keep their input order.
pub fn rank_players<'a, I>(players: I) -> Vec<&'a Player>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut ranked: Vec<&Player> = players.into_iter().collect();
    ranked.sort_by(|a, b| standing_order(a, b));
    ranked
}

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position.
    pub rank: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub total_score: u64,
    pub current_round_number: u32,
    pub current_round_score: u64,
    pub completed_rounds: usize,
    /// Row belongs to the viewing player.
    pub is_viewer: bool,
}

/// A ranked view of one session snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    standings: Vec<Standing>,
}

impl Leaderboard {
    /// Rank a snapshot from the point of view of `viewer`.
    #[must_use]
    pub fn from_session(session: &GameSession, viewer: Option<&PlayerId>) -> Self {
        let standings = rank_players(session.players_by_id())
            .into_iter()
            .enumerate()
            .map(|(i, player)| Standing {
                rank: i + 1,
                player_id: player.id.clone(),
                name: player.name.clone(),
                total_score: player.total_score,
                current_round_number: player.current_round_number,
                current_round_score: player.current_round_score,
                completed_rounds: player.completed_rounds(),
                is_viewer: viewer == Some(&player.id),
            })
            .collect();

        Self { standings }
    }

    #[must_use]
    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    /// Top row, if anyone has joined.
    #[must_use]
    pub fn leader(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Rank of a player, if present.
    #[must_use]
    pub fn rank_of(&self, player: &PlayerId) -> Option<usize> {
        self.standings
            .iter()
            .find(|s| &s.player_id == player)
            .map(|s| s.rank)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.standings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.standings.is_empty()
    }
}
