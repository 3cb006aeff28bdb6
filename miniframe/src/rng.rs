//! MonteCarlo sampling source.
//!
//! Injected through a trait so the expander's branch sampling is testable
//! and reproducible (spec.md §8 property 7), the way `peregrine` injects a
//! seeded `rand::rngs::StdRng` rather than calling `rand::thread_rng()`
//! directly from simulation-core code.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform `[0, 1)` samples for MonteCarlo branch selection.
pub trait SamplingSource {
    /// Draw one sample in `[0, 1)`.
    fn sample_unit(&mut self) -> f64;
}

/// The default sampling source for release builds: a thread-local generator.
#[derive(Debug, Default)]
pub struct ThreadRngSource {
    rng: ThreadRng,
}

impl SamplingSource for ThreadRngSource {
    fn sample_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// A seeded, reproducible sampling source for tests and deterministic reruns.
#[derive(Debug, Clone)]
pub struct StdRngSource {
    rng: StdRng,
}

impl StdRngSource {
    /// Create a source seeded deterministically from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SamplingSource for StdRngSource {
    fn sample_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
