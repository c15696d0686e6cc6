//! Injectable randomness
//!
//! Allocation never touches an ambient generator. Callers pass a
//! [`RandomSource`]; production code wraps a `rand` generator in
//! [`RngSource`], tests supply fixed sequences.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Source of uniform integer draws
pub trait RandomSource {
    /// Uniform draw from `[0, upper)`; returns 0 when `upper <= 1`
    fn below(&mut self, upper: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn below(&mut self, upper: usize) -> usize {
        (**self).below(upper)
    }
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    /// Wrap a generator
    #[inline]
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for a seed
    #[inline]
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RngSource<ThreadRng> {
    /// Thread-local generator
    #[inline]
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn below(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            0
        } else {
            self.0.random_range(0..upper)
        }
    }
}

/// Fisher–Yates shuffle driven by a [`RandomSource`]
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
