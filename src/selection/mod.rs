//! Client-side pending selection.
//!
//! Ephemeral, per-viewer, never persisted. Resolves to a `ScoreAction`
//! when the viewer saves.

pub mod pending;

pub use pending::{PendingSelection, Preview};
