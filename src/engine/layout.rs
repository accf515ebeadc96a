//! Spatial re-layout of sample points for visual clarity.
//!
//! Random x-positions produce overlapping fixed-width rectangles. The
//! adjusted layout remaps each sample onto evenly spaced anchor points while
//! preserving relative rank, so rectangles tile side-by-side and total
//! rectangle area reads directly as the estimate. Layout is independent of
//! sampling logic and never changes the function values.

use serde::{Deserialize, Serialize};

use crate::engine::rng::SampleRng;

/// Display-coordinate layout mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Display coordinates equal the sampled x-positions (identity).
    Exact,
    /// Rank-preserving remap onto evenly spaced anchors.
    #[default]
    Adjusted,
}

/// Compute display coordinates for the given sample positions.
///
/// With `LayoutMode::Exact` the input is returned unchanged. With
/// `LayoutMode::Adjusted`, sample i maps to anchor `a_{rank(x_i) - 1}` where
/// `a_k = k / (n - 1)` for `k = 0..n-1` (a single anchor at 0 when n = 1).
/// Ties in value are broken by a uniformly random permutation among the tied
/// indices, drawn from `rng`, so the output is always a bijection onto the
/// anchor set regardless of duplicate draws.
#[must_use]
pub fn display_coordinates(x: &[f64], mode: LayoutMode, rng: &mut SampleRng) -> Vec<f64> {
    match mode {
        LayoutMode::Exact => x.to_vec(),
        LayoutMode::Adjusted => adjusted_coordinates(x, rng),
    }
}

/// Rank-preserving remap onto `{k / (n - 1)}` with random tie-breaking.
fn adjusted_coordinates(x: &[f64], rng: &mut SampleRng) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return Vec::new();
    }

    // One random key per index: sorting by (value, key) breaks ties by a
    // uniformly random permutation among equal values.
    let keys: Vec<u64> = (0..n).map(|_| rng.gen_u64()).collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        x[a].partial_cmp(&x[b])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(keys[a].cmp(&keys[b]))
    });

    let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
    let mut xx = vec![0.0; n];
    for (rank, &i) in order.iter().enumerate() {
        xx[i] = rank as f64 / denom;
    }

    xx
}
