//! Deterministic random source for rank generation
//!
//! Every random generator owns its own [`RankRng`]. When a seed is supplied
//! (normally from the `RNG_SEED` environment variable) the stream is fully
//! reproducible: the same seed and the same sequence of calls yield the same
//! draws, bit for bit. Without a seed the generator is seeded from system
//! entropy.
//!
//! # Example
//!
//! ```
//! use rankgen::util::rng::{acquire_rng, RandomSource};
//!
//! let mut a = acquire_rng(Some(7));
//! let mut b = acquire_rng(Some(7));
//! assert_eq!(a.draw(), b.draw());
//!
//! let x = a.draw();
//! assert!((0.0..1.0).contains(&x));
//! ```

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// A source of uniform draws in `[0, 1)`
///
/// Samplers only depend on this trait, so tests can feed them fixed draws.
pub trait RandomSource {
    /// Draw a uniformly distributed float in `[0, 1)`
    fn draw(&mut self) -> f64;
}

/// Seedable xoshiro256++ source
#[derive(Debug, Clone)]
pub struct RankRng {
    rng: Xoshiro256PlusPlus,
}

impl RankRng {
    /// Create a source seeded from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: Xoshiro256PlusPlus::from_entropy(),
        }
    }

    /// Create a reproducible source
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl RandomSource for RankRng {
    #[inline]
    fn draw(&mut self) -> f64 {
        // Standard f64 sampling yields [0, 1)
        self.rng.gen::<f64>()
    }
}

/// Build the random source for one generator invocation
pub fn acquire_rng(seed: Option<u64>) -> RankRng {
    match seed {
        Some(seed) => {
            tracing::debug!(seed, "seeding rank rng");
            RankRng::with_seed(seed)
        }
        None => RankRng::from_entropy(),
    }
}

/// Fixed sequence of draws, cycled
///
/// Drives samplers through exact boundary cases in tests.
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedDraws {
    draws: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedDraws {
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "ScriptedDraws needs at least one draw");
        Self { draws, next: 0 }
    }

    /// `count` draws evenly spaced over `[0, 1)`, starting at 0
    pub(crate) fn evenly_spaced(count: usize) -> Self {
        Self::new((0..count).map(|i| i as f64 / count as f64).collect())
    }
}

#[cfg(test)]
impl RandomSource for ScriptedDraws {
    fn draw(&mut self) -> f64 {
        let value = self.draws[self.next];
        self.next = (self.next + 1) % self.draws.len();
        value
    }
}
