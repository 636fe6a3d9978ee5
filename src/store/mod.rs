//! Session store capability.
//!
//! The scorecard never owns persistence. It talks to a `SessionStore`:
//! create and read sessions, subscribe to snapshots, add players, and merge
//! partial player updates. `InMemoryStore` is the bundled implementation;
//! a document database or replicated log can stand in without touching the
//! scoring code.
//!
//! ## Contract
//!
//! - `subscribe` delivers the current snapshot (or `None`) immediately, then
//!   a full snapshot after every mutation. Never partial state.
//! - Delivery is eventually consistent: a subscriber may skip intermediate
//!   snapshots but always ends on the latest.
//! - `apply_player_update` on a missing session or player logs and does
//!   nothing. It does not fail.
//! - Concurrent writers are last-write-wins per field.

pub mod update;
pub mod subscription;
pub mod memory;

use std::sync::Arc;

use crate::core::{GameSession, PlayerId, SessionId};

pub use update::PlayerUpdate;
pub use subscription::Subscription;
pub use memory::InMemoryStore;

/// Snapshot listener. `None` means the session does not exist.
pub type SessionCallback = Arc<dyn Fn(Option<&GameSession>) + Send + Sync>;

/// Storage and fan-out for scorecard sessions.
pub trait SessionStore: Send + Sync {
    /// Allocate a new empty session.
    fn create_session(&self) -> SessionId;

    /// Latest snapshot, or `None` if absent.
    fn get_session(&self, session_id: &SessionId) -> Option<GameSession>;

    /// Listen for snapshots of a session. See the module contract.
    fn subscribe(&self, session_id: &SessionId, on_change: SessionCallback) -> Subscription;

    /// Insert a freshly initialized player. Duplicate names are allowed.
    fn join_session(&self, session_id: &SessionId, player_id: &PlayerId, name: &str);

    /// Merge the named fields into one player's record.
    fn apply_player_update(&self, session_id: &SessionId, player_id: &PlayerId, update: &PlayerUpdate);
}
