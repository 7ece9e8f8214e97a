//! Randomized tower heights.
//!
//! New towers get a geometrically distributed height: start at 1 and keep
//! flipping a fair coin, growing one level per heads. Expected height is 2,
//! and across many insertions the level populations thin out by roughly half
//! per level, which is what gives the skip list its expected O(log n)
//! searches.
//!
//! The distribution is unbounded in principle, so a hard cap bounds memory
//! in practice. The cap is one below [`MAX_HEIGHT`] so the sentinel tower
//! can always grow strictly taller than any real tower.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Maximum skip list height, sentinel included. 32 levels covers billions
/// of elements at p = 0.5.
pub const MAX_HEIGHT: usize = 32;

/// Draws geometrically distributed tower heights in `1..=max`.
///
/// Each generator owns its random state, so independent sets never share
/// randomness.
pub struct LevelGenerator {
    max: u32,
    rng: SmallRng,
}

impl LevelGenerator {
    /// Create a generator with entropy-derived seed.
    ///
    /// # Panics
    ///
    /// Panics if `max` is zero.
    pub fn new(max: u32) -> LevelGenerator {
        return LevelGenerator::with_seed(max, rand::rng().random());
    }

    /// Create a generator with a fixed seed, for reproducible tests.
    pub fn with_seed(max: u32, seed: u64) -> LevelGenerator {
        assert!(max >= 1, "max height must be at least 1");
        return LevelGenerator {
            max,
            rng: SmallRng::seed_from_u64(seed),
        };
    }

    /// The cap on generated heights.
    pub fn max(&self) -> u32 {
        return self.max;
    }

    /// Draw one height: 1 plus the number of consecutive heads, capped.
    pub fn random(&mut self) -> u32 {
        let mut height = 1;
        while height < self.max && self.rng.random::<bool>() {
            height += 1;
        }
        return height;
    }
}
