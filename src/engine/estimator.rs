//! Sample-mean estimation of the integral.
//!
//! By the Law of Large Numbers, E[f(X)] for X ~ Uniform(0,1) equals
//! ∫₀¹ f(x) dx, and the sample mean is an unbiased, consistent estimator of
//! that expectation. Variance of the estimate is O(1/n) and is a known
//! accuracy limitation, not a defect; the estimator itself computes only the
//! mean.

/// Arithmetic mean of the function values: the Monte Carlo estimate of
/// ∫₀¹ f(x) dx.
///
/// Returns 0.0 for an empty slice; the pipeline guarantees n ≥ 1 before this
/// is reached.
#[must_use]
pub fn sample_mean(y: &[f64]) -> f64 {
    if y.is_empty() {
        return 0.0;
    }
    y.iter().sum::<f64>() / y.len() as f64
}

/// Standard error of the sample mean, `sqrt(Var(y) / n)`.
///
/// Supplemental diagnostic used by result accessors; not part of the
/// per-frame estimation path.
#[must_use]
pub fn standard_error(y: &[f64]) -> f64 {
    let n = y.len();
    if n == 0 {
        return 0.0;
    }

    let mean = sample_mean(y);
    let sum_sq: f64 = y.iter().map(|v| v * v).sum();
    let variance = ((sum_sq / n as f64) - mean * mean).max(0.0);

    (variance / n as f64).sqrt()
}

/// Incremental running mean, updated one sample per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningMean {
    sum: f64,
    count: usize,
}

impl RunningMean {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self { sum: 0.0, count: 0 }
    }

    /// Add one function value.
    pub fn push(&mut self, y: f64) {
        self.sum += y;
        self.count += 1;
    }

    /// Number of values accumulated so far.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Current running estimate (0.0 before the first value).
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }
}
