//! In-memory session store.
//!
//! Sessions live in an `FxHashMap` behind a `parking_lot::RwLock`. Each
//! mutation bumps the session's revision, clones the snapshot under the
//! lock, and fans it out to subscribers after the lock is released, so a
//! callback may call back into the store.
//!
//! Fan-out can interleave between concurrent writers. Each subscriber has a
//! mailbox holding the newest snapshot not yet handed over. Whichever thread
//! finds the mailbox idle drains it; everyone else just drops their snapshot
//! in and returns. So one subscriber sees snapshots one at a time, in
//! revision order, and no lock is held while a callback runs. A callback may
//! write back to the store from any thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::subscription::Subscription;
use super::update::PlayerUpdate;
use super::{SessionCallback, SessionStore};
use crate::core::{now_millis, GameSession, IdRng, Player, PlayerId, SessionId, StoreConfig};
use crate::error::ScorecardError;

struct Subscriber {
    id: u64,
    callback: SessionCallback,
    mailbox: Arc<Mutex<Mailbox>>,
}

#[derive(Default)]
struct Mailbox {
    /// Newest revision accepted, plus one. Zero until the first snapshot.
    accepted: u64,
    /// Waiting to be handed to the callback. `Some(None)` means "absent".
    pending: Option<Option<GameSession>>,
    /// A thread is currently handing snapshots to the callback.
    draining: bool,
}

fn deliver(callback: &SessionCallback, mailbox: &Mutex<Mailbox>, session: Option<&GameSession>) {
    {
        let mut mb = mailbox.lock();
        match session {
            Some(snapshot) => {
                let stamp = snapshot.revision + 1;
                if stamp <= mb.accepted {
                    return;
                }
                mb.accepted = stamp;
                mb.pending = Some(Some(snapshot.clone()));
            }
            None => {
                if mb.accepted > 0 || mb.pending.is_some() {
                    return;
                }
                mb.pending = Some(None);
            }
        }
        if mb.draining {
            return;
        }
        mb.draining = true;
    }

    loop {
        let next = {
            let mut mb = mailbox.lock();
            match mb.pending.take() {
                Some(next) => next,
                None => {
                    mb.draining = false;
                    return;
                }
            }
        };
        callback(next.as_ref());
    }
}

struct Inner {
    config: StoreConfig,
    sessions: RwLock<FxHashMap<SessionId, GameSession>>,
    subscribers: RwLock<FxHashMap<SessionId, Vec<Subscriber>>>,
    rng: Mutex<IdRng>,
    next_subscriber: AtomicU64,
}

impl Inner {
    fn notify(&self, snapshot: &GameSession) {
        let listeners: Vec<(SessionCallback, Arc<Mutex<Mailbox>>)> = self
            .subscribers
            .read()
            .get(&snapshot.id)
            .map(|subs| {
                subs.iter()
                    .map(|s| (Arc::clone(&s.callback), Arc::clone(&s.mailbox)))
                    .collect()
            })
            .unwrap_or_default();

        debug!(
            session_id = %snapshot.id,
            revision = snapshot.revision,
            listeners = listeners.len(),
            "broadcasting session snapshot"
        );

        for (callback, mailbox) in &listeners {
            deliver(callback, mailbox, Some(snapshot));
        }
    }

    fn unsubscribe(&self, session_id: &SessionId, subscriber: u64) {
        let mut subscribers = self.subscribers.write();
        if let Some(subs) = subscribers.get_mut(session_id) {
            subs.retain(|s| s.id != subscriber);
            if subs.is_empty() {
                subscribers.remove(session_id);
            }
        }
    }

    /// Run `mutate` on a session under the write lock; on success bump the
    /// revision and broadcast the result.
    fn mutate<F>(&self, session_id: &SessionId, mutate: F) -> Option<GameSession>
    where
        F: FnOnce(&mut GameSession) -> bool,
    {
        let snapshot = {
            let mut sessions = self.sessions.write();
            let session = sessions.get_mut(session_id)?;
            if !mutate(session) {
                return None;
            }
            session.revision += 1;
            session.clone()
        };
        self.notify(&snapshot);
        Some(snapshot)
    }
}

/// Thread-safe in-memory `SessionStore`.
///
/// Cloning the store shares the same underlying sessions.
///
/// ## Example
///
/// ```
/// use flip_scorecard::core::PlayerId;
/// use flip_scorecard::store::{InMemoryStore, SessionStore};
///
/// let store = InMemoryStore::new();
/// let session = store.create_session();
/// store.join_session(&session, &PlayerId::new("p1"), "Ada");
///
/// let snapshot = store.get_session(&session).unwrap();
/// assert_eq!(snapshot.player_count(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::with_config(StoreConfig::default())
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        let rng = IdRng::from_seed_option(config.seed);
        Self {
            inner: Arc::new(Inner {
                config,
                sessions: RwLock::new(FxHashMap::default()),
                subscribers: RwLock::new(FxHashMap::default()),
                rng: Mutex::new(rng),
                next_subscriber: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Ids of all stored sessions, sorted.
    #[must_use]
    pub fn session_ids(&self) -> Vec<SessionId> {
        let mut ids: Vec<SessionId> = self.inner.sessions.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Active subscriptions for a session.
    #[must_use]
    pub fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.inner
            .subscribers
            .read()
            .get(session_id)
            .map_or(0, Vec::len)
    }

    /// Encode every session as a bincode snapshot.
    pub fn export_snapshot(&self) -> Result<Vec<u8>, ScorecardError> {
        let mut sessions: Vec<GameSession> = self.inner.sessions.read().values().cloned().collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        let bytes = bincode::serialize(&sessions)?;
        debug!(sessions = sessions.len(), bytes = bytes.len(), "exported store snapshot");
        Ok(bytes)
    }

    /// Load sessions from a bincode snapshot, replacing same-id sessions.
    ///
    /// Subscribers of replaced sessions receive the loaded state. Returns
    /// the number of sessions loaded.
    pub fn import_snapshot(&self, bytes: &[u8]) -> Result<usize, ScorecardError> {
        let loaded: Vec<GameSession> = bincode::deserialize(bytes)?;
        let count = loaded.len();

        let mut snapshots = Vec::with_capacity(count);
        {
            let mut sessions = self.inner.sessions.write();
            for mut session in loaded {
                if let Some(existing) = sessions.get(&session.id) {
                    session.revision = session.revision.max(existing.revision + 1);
                }
                snapshots.push(session.clone());
                sessions.insert(session.id.clone(), session);
            }
        }
        for snapshot in &snapshots {
            self.inner.notify(snapshot);
        }

        info!(sessions = count, "imported store snapshot");
        Ok(count)
    }
}

impl SessionStore for InMemoryStore {
    fn create_session(&self) -> SessionId {
        let len = self.inner.config.session_id_len;
        let snapshot = {
            let mut sessions = self.inner.sessions.write();
            let mut rng = self.inner.rng.lock();
            let mut id = rng.session_id(len);
            while sessions.contains_key(&id) {
                id = rng.session_id(len);
            }
            let session = GameSession::new(id.clone(), now_millis());
            sessions.insert(id, session.clone());
            session
        };

        info!(session_id = %snapshot.id, "created session");
        self.inner.notify(&snapshot);
        snapshot.id
    }

    fn get_session(&self, session_id: &SessionId) -> Option<GameSession> {
        self.inner.sessions.read().get(session_id).cloned()
    }

    fn subscribe(&self, session_id: &SessionId, on_change: SessionCallback) -> Subscription {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::SeqCst);
        let callback = Arc::clone(&on_change);
        let mailbox = Arc::new(Mutex::new(Mailbox::default()));

        // Register before reading, so no mutation can fall between the
        // initial snapshot and the first broadcast.
        self.inner
            .subscribers
            .write()
            .entry(session_id.clone())
            .or_default()
            .push(Subscriber {
                id,
                callback: on_change,
                mailbox: Arc::clone(&mailbox),
            });

        debug!(session_id = %session_id, subscriber = id, "subscribed");
        deliver(&callback, &mailbox, self.get_session(session_id).as_ref());

        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        let session_id = session_id.clone();
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.unsubscribe(&session_id, id);
                debug!(session_id = %session_id, subscriber = id, "unsubscribed");
            }
        })
    }

    fn join_session(&self, session_id: &SessionId, player_id: &PlayerId, name: &str) {
        {
            let mut sessions = self.inner.sessions.write();
            if !sessions.contains_key(session_id) {
                debug!(session_id = %session_id, "join on unknown session, creating it");
                sessions.insert(
                    session_id.clone(),
                    GameSession::new(session_id.clone(), now_millis()),
                );
            }
        }

        let player = Player::new(player_id.clone(), name);
        let joined = self.inner.mutate(session_id, |session| {
            session.players.insert(player_id.clone(), player);
            true
        });

        if joined.is_some() {
            info!(session_id = %session_id, player_id = %player_id, name, "player joined");
        }
    }

    fn apply_player_update(&self, session_id: &SessionId, player_id: &PlayerId, update: &PlayerUpdate) {
        if update.is_empty() {
            debug!(session_id = %session_id, player_id = %player_id, "empty player update ignored");
            return;
        }

        let mut found = false;
        self.inner.mutate(session_id, |session| {
            match session.players.get_mut(player_id) {
                Some(player) => {
                    update.apply_to(player);
                    found = true;
                    true
                }
                None => false,
            }
        });

        if found {
            let fields: Vec<&str> = update.field_names().collect();
            debug!(
                session_id = %session_id,
                player_id = %player_id,
                ?fields,
                "applied player update"
            );
        } else {
            warn!(
                session_id = %session_id,
                player_id = %player_id,
                "session or player not found, update dropped"
            );
        }
    }
}
