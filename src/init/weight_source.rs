use rand::distributions::{Distribution, Uniform};
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies the initial weight of every connection the network allocates.
pub trait WeightSource {
    fn next_weight(&mut self) -> f64;
}

impl<W: WeightSource + ?Sized> WeightSource for &mut W {
    fn next_weight(&mut self) -> f64 {
        (**self).next_weight()
    }
}

/// Draws weights uniformly from `[0, 1)`.
pub struct UniformWeights<R: Rng> {
    rng: R,
    dist: Uniform<f64>,
}

impl<R: Rng> UniformWeights<R> {
    pub fn new(rng: R) -> Self {
        UniformWeights {
            rng,
            dist: Uniform::new(0.0, 1.0),
        }
    }
}

impl UniformWeights<ChaCha8Rng> {
    /// Reproducible source: the same seed always yields the same weights.
    pub fn seeded(seed: u64) -> Self {
        UniformWeights::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl UniformWeights<ThreadRng> {
    pub fn thread() -> Self {
        UniformWeights::new(rand::thread_rng())
    }
}

impl<R: Rng> WeightSource for UniformWeights<R> {
    fn next_weight(&mut self) -> f64 {
        self.dist.sample(&mut self.rng)
    }
}

/// Hands out the same weight for every connection.
#[derive(Debug, Clone, Copy)]
pub struct ConstantWeights(pub f64);

impl WeightSource for ConstantWeights {
    fn next_weight(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of weights, in allocation order.
#[derive(Debug, Clone)]
pub struct SequenceWeights {
    values: Vec<f64>,
    next: usize,
}

impl SequenceWeights {
    /// `values` must not be empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "SequenceWeights needs at least one value");
        SequenceWeights { values, next: 0 }
    }
}

impl WeightSource for SequenceWeights {
    fn next_weight(&mut self) -> f64 {
        let w = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        w
    }
}
