//! Id generation for sessions and players.
//!
//! - Session ids: short lowercase base-36 tokens (`k3x9a0q`)
//! - Player ids: `player_<unix millis>_<token>`
//!
//! Backed by ChaCha8. Seeded generators produce identical id sequences,
//! which keeps store tests reproducible; production stores seed from
//! OS entropy.
//!
//! ```
//! use flip_scorecard::core::IdRng;
//!
//! let mut a = IdRng::new(42);
//! let mut b = IdRng::new(42);
//! assert_eq!(a.token(7), b.token(7));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::player::PlayerId;
use super::session::SessionId;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random id generator.
#[derive(Clone, Debug)]
pub struct IdRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl IdRng {
    /// Create a generator with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded if `Some`, entropy otherwise.
    #[must_use]
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// The fixed seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Random lowercase base-36 token of `len` characters.
    pub fn token(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| BASE36[self.inner.gen_range(0..BASE36.len())] as char)
            .collect()
    }

    /// Fresh session id.
    pub fn session_id(&mut self, len: usize) -> SessionId {
        SessionId::new(self.token(len))
    }

    /// Fresh player id stamped with the join time.
    pub fn player_id(&mut self, joined_at_millis: u64) -> PlayerId {
        PlayerId::new(format!("player_{}_{}", joined_at_millis, self.token(7)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = IdRng::new(42);
        let mut rng2 = IdRng::new(42);

        for _ in 0..20 {
            assert_eq!(rng1.token(7), rng2.token(7));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = IdRng::new(1);
        let mut rng2 = IdRng::new(2);

        let seq1: Vec<_> = (0..5).map(|_| rng1.token(7)).collect();
        let seq2: Vec<_> = (0..5).map(|_| rng2.token(7)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_token_alphabet_and_length() {
        let mut rng = IdRng::new(7);
        for len in [1, 7, 32] {
            let token = rng.token(len);
            assert_eq!(token.len(), len);
            assert!(token
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_session_ids_rarely_collide() {
        let mut rng = IdRng::new(99);
        let ids: std::collections::HashSet<_> = (0..1000).map(|_| rng.session_id(7)).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_player_id_format() {
        let mut rng = IdRng::new(3);
        let id = rng.player_id(1_700_000_000_123);
        let parts: Vec<&str> = id.as_str().split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "player");
        assert_eq!(parts[1], "1700000000123");
        assert_eq!(parts[2].len(), 7);
    }

    #[test]
    fn test_seed_option() {
        assert_eq!(IdRng::from_seed_option(Some(5)).seed(), Some(5));
        assert_eq!(IdRng::from_seed_option(None).seed(), None);
    }
}
