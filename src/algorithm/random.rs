//! Injectable randomness for tile sampling, tie-breaking and spawn choice

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of every random decision the collapse makes
///
/// Substitute a scripted implementation to make runs fully deterministic.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Fair coin, `true` for heads
    fn coin(&mut self) -> bool;

    /// Uniform index in `[0, upper)`; returns 0 when `upper` is 0
    fn index(&mut self, upper: usize) -> usize;
}

/// Seeded random source for reproducible runs
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a deterministic random source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    fn index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.random_range(0..upper)
    }
}

/// Replays scripted values, cycling each stream independently
///
/// Empty streams fall back to `0.0`, tails, and index 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    uniforms: Vec<f64>,
    coins: Vec<bool>,
    indices: Vec<usize>,
    uniform_cursor: usize,
    coin_cursor: usize,
    index_cursor: usize,
}

impl SequenceRandom {
    /// Create a source replaying the given streams
    pub const fn new(uniforms: Vec<f64>, coins: Vec<bool>, indices: Vec<usize>) -> Self {
        Self {
            uniforms,
            coins,
            indices,
            uniform_cursor: 0,
            coin_cursor: 0,
            index_cursor: 0,
        }
    }

    /// Source whose coin always lands on `heads` and whose draws are all `uniform`
    pub fn constant(uniform: f64, heads: bool) -> Self {
        Self::new(vec![uniform], vec![heads], vec![0])
    }

    fn next<T: Copy>(values: &[T], cursor: &mut usize) -> Option<T> {
        if values.is_empty() {
            return None;
        }
        let value = values.get(*cursor % values.len()).copied();
        *cursor = cursor.wrapping_add(1);
        value
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self) -> f64 {
        Self::next(&self.uniforms, &mut self.uniform_cursor).unwrap_or(0.0)
    }

    fn coin(&mut self) -> bool {
        Self::next(&self.coins, &mut self.coin_cursor).unwrap_or(false)
    }

    fn index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        Self::next(&self.indices, &mut self.index_cursor).unwrap_or(0) % upper
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn index(&mut self, upper: usize) -> usize {
        (**self).index(upper)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn index(&mut self, upper: usize) -> usize {
        (**self).index(upper)
    }
}
