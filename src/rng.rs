//! # Random Positions
//!
//! The `RandomNumberGenerator` struct wraps a seeded `StdRng` and samples
//! positions uniformly inside a hyper-cube. Every climber owns its own
//! generator, so no sampling ever needs synchronization.
//!
//! A run takes one base seed (from the system clock unless configured) and
//! derives an independent generator per climber from it:
//!
//! ```rust
//! use hillclimb::position::Position;
//! use hillclimb::rng::{PositionSampler, RandomNumberGenerator};
//!
//! let base = 42;
//! let mut first = RandomNumberGenerator::for_worker(base, 0);
//! let mut second = RandomNumberGenerator::for_worker(base, 1);
//!
//! let a: Position<2> = first.sample(-5.12, 5.12);
//! let b: Position<2> = second.sample(-5.12, 5.12);
//! assert!(a.within(5.12) && b.within(5.12));
//! assert_ne!(a, b);
//! ```

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::position::Position;

/// Something that can produce positions uniformly inside `[low, high]^D`.
///
/// `RandomNumberGenerator` is the production sampler. The trait exists so a
/// climber can be driven by a scripted sequence of positions in tests.
pub trait PositionSampler<const D: usize> {
    /// Returns a position whose components are drawn independently from
    /// `[low, high]`.
    fn sample(&mut self, low: f64, high: f64) -> Position<D>;
}

/// Returns a seed derived from the current system time.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a generator seeded from the system clock.
    pub fn new() -> Self {
        Self::from_seed(time_seed())
    }

    /// Creates a generator with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the generator for climber `worker` of a run seeded with `base_seed`.
    ///
    /// The worker index is scrambled into the seed so neighboring workers get
    /// unrelated streams.
    pub fn for_worker(base_seed: u64, worker: usize) -> Self {
        Self::from_seed(mix_seed(base_seed, worker as u64))
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> PositionSampler<D> for RandomNumberGenerator {
    fn sample(&mut self, low: f64, high: f64) -> Position<D> {
        let mut components = [0.0; D];
        for c in components.iter_mut() {
            *c = self.rng.gen_range(low..=high);
        }
        Position::new(components)
    }
}

// splitmix64 finalizer
fn mix_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
