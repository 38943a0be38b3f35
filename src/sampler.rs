use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks which children of a directory are evaluated exactly.
pub trait Sampler {
    /// `amount` distinct indices out of `0..len`, uniformly, without
    /// replacement. `amount` never exceeds `len`.
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize>;
}

/// A [`Sampler`] drawing from a pseudorandom stream.
///
/// The stream is consumed in traversal order, so a fixed seed over an
/// unchanged tree reproduces the same estimates.
#[derive(Debug, Clone)]
pub struct RandomSampler<R> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler for RandomSampler<R> {
    fn sample(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}
