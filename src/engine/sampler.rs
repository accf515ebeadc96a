//! Uniform sample generation and integrand evaluation.
//!
//! Draws n i.i.d. Uniform(0,1) points and evaluates the integrand at each.
//! Evaluation failures surface as non-finite values and abort the pipeline
//! immediately; no partial sample set is ever returned.

use serde::{Deserialize, Serialize};

use crate::engine::rng::SampleRng;
use crate::error::{EstResult, EstimarError};

/// A single Monte Carlo sample.
///
/// Immutable once drawn. `index` is 1-based to match frame numbering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 1-based draw index in [1, n].
    pub index: usize,
    /// Sampled point in [0, 1].
    pub x: f64,
    /// Integrand value at `x`.
    pub y: f64,
}

/// Draws uniform samples and evaluates the integrand.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    /// Number of samples to draw.
    n: usize,
}

impl Sampler {
    /// Create a sampler for `n` draws.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n < 1`. The check runs before any
    /// sampling occurs.
    pub fn new(n: usize) -> EstResult<Self> {
        if n < 1 {
            return Err(EstimarError::invalid_argument(format!(
                "sample count must be at least 1, got {n}"
            )));
        }
        Ok(Self { n })
    }

    /// Get the configured sample count.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Draw `n` samples and evaluate `f` at each.
    ///
    /// Consumes randomness from `rng`; no other side effects.
    ///
    /// # Errors
    ///
    /// Returns `FunctionEvaluation` the moment `f` produces a non-finite
    /// value. The failure propagates immediately; samples already drawn are
    /// discarded.
    pub fn draw<F>(&self, f: F, rng: &mut SampleRng) -> EstResult<Vec<Sample>>
    where
        F: Fn(f64) -> f64,
    {
        let mut samples = Vec::with_capacity(self.n);

        for i in 1..=self.n {
            let x = rng.gen_f64();
            let y = f(x);

            if !y.is_finite() {
                return Err(EstimarError::FunctionEvaluation { index: i, x });
            }

            samples.push(Sample { index: i, x, y });
        }

        Ok(samples)
    }
}
