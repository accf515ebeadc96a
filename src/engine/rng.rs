//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with an explicit master
//! seed. The generator is the single entropy source of the pipeline: it
//! supplies both the Uniform(0,1) sample draws and the layout tie-breaking
//! keys, so fixing the seed fixes the entire animation.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all random number sequences are
//! bitwise-identical across runs and platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct SampleRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SampleRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        let rng = Pcg64::seed_from_u64(master_seed);
        Self { master_seed, rng }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in the given range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }

    /// Generate a random u64.
    pub fn gen_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Generate n random f64 samples in [0, 1).
    #[must_use]
    pub fn sample_n(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.gen_f64()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Property: Same seed produces same sequence.
    #[test]
    fn test_reproducibility() {
        let mut rng1 = SampleRng::new(42);
        let mut rng2 = SampleRng::new(42);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_eq!(seq1, seq2, "Same seed must produce identical sequences");
    }

    /// Property: Different seeds produce different sequences.
    #[test]
    fn test_different_seeds() {
        let mut rng1 = SampleRng::new(42);
        let mut rng2 = SampleRng::new(43);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_ne!(
            seq1, seq2,
            "Different seeds must produce different sequences"
        );
    }

    /// Property: Range sampling stays in bounds.
    #[test]
    fn test_range_bounds() {
        let mut rng = SampleRng::new(42);

        for _ in 0..1000 {
            let v = rng.gen_range_f64(-10.0, 10.0);
            assert!((-10.0..10.0).contains(&v), "Value out of range: {v}");
        }
    }

    #[test]
    fn test_master_seed_accessor() {
        let rng = SampleRng::new(7);
        assert_eq!(rng.master_seed(), 7);
    }

    #[test]
    fn test_gen_u64() {
        let mut rng = SampleRng::new(42);
        let v1 = rng.gen_u64();
        let v2 = rng.gen_u64();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_sample_n() {
        let mut rng = SampleRng::new(42);
        let samples = rng.sample_n(10);
        assert_eq!(samples.len(), 10);
        for s in &samples {
            assert!(*s >= 0.0 && *s < 1.0);
        }
    }

    #[test]
    fn test_sample_rng_clone_diverges_independently() {
        let mut rng = SampleRng::new(42);
        let mut cloned = rng.clone();
        // Clones continue from the same state
        assert_eq!(rng.gen_u64(), cloned.gen_u64());
    }

    #[test]
    fn test_sample_rng_debug() {
        let rng = SampleRng::new(42);
        let debug = format!("{rng:?}");
        assert!(debug.contains("SampleRng"));
    }
}
