//! Core scorecard types: cards, players, sessions, configuration, ids.
//!
//! Everything here is plain data. Scoring rules live in `scoring`, and
//! storage lives behind the `store` capability.

pub mod card;
pub mod player;
pub mod session;
pub mod config;
pub mod rng;

pub use card::{CardSet, CardValue, MAX_CARD_VALUE};
pub use player::{normalize_name, Player, PlayerId, RoundPhase};
pub use session::{now_millis, GameSession, SessionId};
pub use config::{ScoringConfig, StoreConfig, MAX_MODIFIER_DECK, STANDARD_MODIFIERS};
pub use rng::IdRng;
