//! Random source port for the draw algorithm.
//!
//! The draw algorithm only asks for a unit value; everything else about
//! randomness lives behind this port so draws can be replayed in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shaku::{Component, Interface};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Source of uniformly distributed values in `[0, 1)`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RandomSource: Interface + Send + Sync {
    /// Returns the next value in `[0, 1)`.
    fn next_unit(&self) -> f64;
}

/// ChaCha8-backed random source.
///
/// Shared between concurrent draws; the generator sits behind a mutex.
#[derive(Component)]
#[shaku(interface = RandomSource)]
pub struct ChaChaRandomSource {
    rng: Mutex<ChaCha8Rng>,
}

impl ChaChaRandomSource {
    /// Creates a reproducible source from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Creates a source seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Builds the DI parameters, seeding when a seed is configured.
    #[must_use]
    pub fn parameters(seed: Option<u64>) -> ChaChaRandomSourceParameters {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        ChaChaRandomSourceParameters {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for ChaChaRandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for ChaChaRandomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaChaRandomSource").finish_non_exhaustive()
    }
}

impl RandomSource for ChaChaRandomSource {
    fn next_unit(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of unit values, cycling when exhausted.
///
/// An empty sequence always yields `0.0`.
#[derive(Debug)]
pub struct FixedRandomSource {
    values: Vec<f64>,
    index: AtomicUsize,
}

impl FixedRandomSource {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            index: AtomicUsize::new(0),
        }
    }

    /// A source that always returns `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl Clone for FixedRandomSource {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            index: AtomicUsize::new(self.index.load(Ordering::SeqCst)),
        }
    }
}

impl RandomSource for FixedRandomSource {
    fn next_unit(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let idx = self.index.fetch_add(1, Ordering::SeqCst) % self.values.len();
        self.values[idx]
    }
}
