//! Scorecard: scoring actions wired to a session store.
//!
//! Each scoring call reads the latest snapshot, computes the player's next
//! state with the pure calculator, and sends the store only the fields that
//! changed. The snapshot may be stale; nothing here assumes exclusive
//! access to the session.
//!
//! Refused operations (`ScorecardError`) never write to the store. A missing
//! session or player is reported to the caller, who decides how to recover
//! (typically by showing the join screen again).

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::core::{
    normalize_name, now_millis, CardSet, GameSession, IdRng, Player, PlayerId, ScoringConfig,
    SessionId,
};
use crate::error::ScorecardError;
use crate::scoring::{Leaderboard, RoundCalculator, ScoreAction};
use crate::selection::PendingSelection;
use crate::store::{PlayerUpdate, SessionStore, Subscription};

/// Scoring front end over a `SessionStore`.
pub struct Scorecard<S: SessionStore> {
    store: Arc<S>,
    calc: RoundCalculator,
    ids: Mutex<IdRng>,
}

impl<S: SessionStore> Scorecard<S> {
    /// Create a scorecard with the given scoring rules.
    #[must_use]
    pub fn new(store: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            store,
            calc: RoundCalculator::new(config),
            ids: Mutex::new(IdRng::from_entropy()),
        }
    }

    /// Use a specific generator for player ids.
    #[must_use]
    pub fn with_id_rng(mut self, rng: IdRng) -> Self {
        self.ids = Mutex::new(rng);
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    #[must_use]
    pub fn calculator(&self) -> &RoundCalculator {
        &self.calc
    }

    // === Sessions ===

    pub fn create_session(&self) -> SessionId {
        self.store.create_session()
    }

    /// Resolve a shared link: reuse the session if it exists, otherwise
    /// start a new one.
    pub fn open_session(&self, requested: Option<&SessionId>) -> SessionId {
        match requested {
            Some(id) if self.store.get_session(id).is_some() => id.clone(),
            Some(id) => {
                info!(session_id = %id, "requested session missing, creating a new one");
                self.store.create_session()
            }
            None => self.store.create_session(),
        }
    }

    /// Latest snapshot.
    pub fn snapshot(&self, session_id: &SessionId) -> Result<GameSession, ScorecardError> {
        self.store
            .get_session(session_id)
            .ok_or_else(|| ScorecardError::SessionNotFound(session_id.clone()))
    }

    /// Latest record for one player.
    pub fn player(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<Player, ScorecardError> {
        let session = self.snapshot(session_id)?;
        session
            .player(player_id)
            .cloned()
            .ok_or_else(|| ScorecardError::PlayerNotFound {
                session: session_id.clone(),
                player: player_id.clone(),
            })
    }

    // === Joining ===

    /// Join a session under a display name. Returns the new player's id.
    pub fn join(&self, session_id: &SessionId, raw_name: &str) -> Result<PlayerId, ScorecardError> {
        let name = normalize_name(raw_name)?;
        let player_id = self.ids.lock().player_id(now_millis());
        self.store.join_session(session_id, &player_id, &name);
        Ok(player_id)
    }

    /// Whether a previously issued player id is still in the session.
    #[must_use]
    pub fn resume(&self, session_id: &SessionId, player_id: &PlayerId) -> bool {
        self.store
            .get_session(session_id)
            .is_some_and(|s| s.contains_player(player_id))
    }

    // === Scoring ===

    /// Apply one action to a player and persist the changed fields.
    ///
    /// Returns the player's new record.
    pub fn apply(
        &self,
        session_id: &SessionId,
        player_id: &PlayerId,
        action: &ScoreAction,
    ) -> Result<Player, ScorecardError> {
        let player = self.player(session_id, player_id)?;
        self.check_action(&player, action)?;

        let next = action.apply(&self.calc, &player);
        let update = PlayerUpdate::diff(&player, &next);
        if !update.is_empty() {
            self.store.apply_player_update(session_id, player_id, &update);
        }

        debug!(
            session_id = %session_id,
            player_id = %player_id,
            action = action.name(),
            round_score = next.current_round_score,
            total_score = next.total_score,
            "applied score action"
        );
        Ok(next)
    }

    /// Claim cards, add modifiers and optionally double.
    pub fn select_cards(
        &self,
        session_id: &SessionId,
        player_id: &PlayerId,
        cards: CardSet,
        modifier_total: u64,
        double_active: bool,
    ) -> Result<Player, ScorecardError> {
        let action = ScoreAction::SelectCards {
            cards,
            modifier_total,
            double_active,
        };
        self.apply(session_id, player_id, &action)
    }

    /// Double and/or add modifiers to the existing round score.
    pub fn apply_modifiers(
        &self,
        session_id: &SessionId,
        player_id: &PlayerId,
        modifier_total: u64,
        double_active: bool,
    ) -> Result<Player, ScorecardError> {
        let action = ScoreAction::ApplyModifiers {
            modifier_total,
            double_active,
        };
        self.apply(session_id, player_id, &action)
    }

    pub fn penalize(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<Player, ScorecardError> {
        self.apply(session_id, player_id, &ScoreAction::Penalty)
    }

    pub fn bust(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<Player, ScorecardError> {
        self.apply(session_id, player_id, &ScoreAction::Bust)
    }

    /// Bank the round. Refused when the round is worth nothing.
    pub fn bank(&self, session_id: &SessionId, player_id: &PlayerId) -> Result<Player, ScorecardError> {
        self.apply(session_id, player_id, &ScoreAction::Bank)
    }

    /// Save a pending selection against the player's latest record.
    ///
    /// Cards a newer snapshot shows as used are dropped from the selection
    /// and the save is refused, so the viewer can review what is left. The
    /// selection is cleared only if the save goes through.
    pub fn commit_selection(
        &self,
        session_id: &SessionId,
        player_id: &PlayerId,
        selection: &mut PendingSelection,
    ) -> Result<Player, ScorecardError> {
        let player = self.player(session_id, player_id)?;
        if let Some(card) = selection.retain_available(player.used_cards_this_round).iter().next() {
            return Err(ScorecardError::CardAlreadyUsed(card.value()));
        }

        let action = selection.to_action(&player).ok_or_else(|| {
            if selection.has_modifiers_or_double() {
                ScorecardError::NothingToApply
            } else {
                ScorecardError::EmptySelection
            }
        })?;

        let next = self.apply(session_id, player_id, &action)?;
        selection.clear();
        Ok(next)
    }

    fn check_action(&self, player: &Player, action: &ScoreAction) -> Result<(), ScorecardError> {
        match *action {
            ScoreAction::SelectCards {
                cards,
                modifier_total,
                ..
            } => {
                if cards.is_empty() {
                    return Err(ScorecardError::EmptySelection);
                }
                if let Some(card) = cards.iter().find(|c| player.used_cards_this_round.contains(*c)) {
                    return Err(ScorecardError::CardAlreadyUsed(card.value()));
                }
                self.check_modifier_total(modifier_total)
            }
            ScoreAction::ApplyModifiers {
                modifier_total,
                double_active,
            } => {
                if modifier_total == 0 && !double_active {
                    return Err(ScorecardError::NothingToApply);
                }
                self.check_modifier_total(modifier_total)
            }
            ScoreAction::Bank if !player.can_bank() => Err(ScorecardError::NothingToBank),
            ScoreAction::Penalty | ScoreAction::Bust | ScoreAction::Bank => Ok(()),
        }
    }

    fn check_modifier_total(&self, modifier_total: u64) -> Result<(), ScorecardError> {
        if self.calc.config().is_reachable_modifier_total(modifier_total) {
            Ok(())
        } else {
            Err(ScorecardError::InvalidModifierTotal(modifier_total))
        }
    }

    // === Leaderboard ===

    /// Rank the latest snapshot.
    pub fn leaderboard(
        &self,
        session_id: &SessionId,
        viewer: Option<&PlayerId>,
    ) -> Result<Leaderboard, ScorecardError> {
        let session = self.snapshot(session_id)?;
        Ok(Leaderboard::from_session(&session, viewer))
    }

    /// Receive a freshly ranked leaderboard on every snapshot.
    ///
    /// `None` is delivered while the session does not exist.
    pub fn watch_leaderboard<F>(
        &self,
        session_id: &SessionId,
        viewer: Option<PlayerId>,
        on_update: F,
    ) -> Subscription
    where
        F: Fn(Option<Leaderboard>) + Send + Sync + 'static,
    {
        self.store.subscribe(
            session_id,
            Arc::new(move |session: Option<&GameSession>| {
                on_update(session.map(|s| Leaderboard::from_session(s, viewer.as_ref())));
            }),
        )
    }
}
