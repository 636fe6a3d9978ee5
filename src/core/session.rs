//! Game sessions: the shared document every participant subscribes to.
//!
//! The player table is an `im::HashMap`, so handing a snapshot to each
//! subscriber is an O(1) clone no matter how many players have joined.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};
use crate::error::InvariantViolation;

/// Opaque short session token, shared in the join link.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A scorecard session.
///
/// Player order is irrelevant here; the leaderboard is always derived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: SessionId,

    /// Creation time in ms since the Unix epoch.
    pub created_at: u64,

    pub players: ImHashMap<PlayerId, Player>,

    /// Bumped by the store on every mutation. Lets subscribers drop a
    /// snapshot that arrives after a newer one.
    #[serde(default)]
    pub revision: u64,
}

impl GameSession {
    /// Create an empty session.
    #[must_use]
    pub fn new(id: SessionId, created_at: u64) -> Self {
        Self {
            id,
            created_at,
            players: ImHashMap::new(),
            revision: 0,
        }
    }

    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    #[must_use]
    pub fn contains_player(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players sorted by id, for deterministic iteration.
    #[must_use]
    pub fn players_by_id(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by(|a, b| a.id.cmp(&b.id));
        players
    }

    /// Verify every player record plus key/id agreement.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (key, player) in &self.players {
            if key != &player.id {
                return Err(InvariantViolation::KeyMismatch {
                    key: key.clone(),
                    id: player.id.clone(),
                });
            }
            player.check_invariants()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(ids: &[&str]) -> GameSession {
        let mut session = GameSession::new(SessionId::new("abc1234"), 1_700_000_000_000);
        for id in ids {
            let player = Player::new(PlayerId::new(*id), format!("name-{id}"));
            session.players.insert(player.id.clone(), player);
        }
        session
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = GameSession::new(SessionId::new("abc1234"), 5);

        assert_eq!(session.player_count(), 0);
        assert_eq!(session.created_at, 5);
        assert_eq!(session.revision, 0);
        assert!(session.check_invariants().is_ok());
    }

    #[test]
    fn test_players_by_id_is_sorted() {
        let session = session_with(&["c", "a", "b"]);
        let ids: Vec<&str> = session.players_by_id().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_snapshot_clone_is_independent() {
        let session = session_with(&["a"]);
        let mut snapshot = session.clone();

        let id = PlayerId::new("a");
        if let Some(player) = snapshot.players.get_mut(&id) {
            player.current_round_score = 9;
        }

        assert_eq!(session.player(&id).map(|p| p.current_round_score), Some(0));
        assert_eq!(snapshot.player(&id).map(|p| p.current_round_score), Some(9));
    }

    #[test]
    fn test_key_mismatch_detected() {
        let mut session = session_with(&[]);
        session
            .players
            .insert(PlayerId::new("x"), Player::new(PlayerId::new("y"), "Ada"));

        assert!(matches!(
            session.check_invariants(),
            Err(InvariantViolation::KeyMismatch { .. })
        ));
    }

    #[test]
    fn test_session_serde() {
        let session = session_with(&["a", "b"]);
        let json = serde_json::to_string(&session).unwrap();
        let back: GameSession = serde_json::from_str(&json).unwrap();
        assert_eq!(session, back);
    }
}
