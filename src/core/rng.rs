//! Deterministic random number generation for simulated attackers.
//!
//! Combat resolution and search are fully deterministic; randomness only
//! enters through autoplay attacker policies. Seeding them from a
//! `GameRng` makes whole simulated games reproducible.
//!
//! ```
//! use netwar::core::GameRng;
//!
//! let moves = ["dos", "sql", "phishing"];
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.choose(&moves), b.choose(&moves));
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }
}
