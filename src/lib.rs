//! # estimar
//!
//! Sample-mean Monte Carlo integration with animated convergence
//! visualization.
//!
//! Estimates ∫₀¹ f(x) dx as the average of f at uniform random points, and
//! presents the running estimate as a sequence of animation frames: one
//! rectangle per sample, settled rectangles accumulating behind the
//! highlighted current one, their combined area converging to the estimate.
//!
//! The pipeline is deterministic per seed, single-threaded, and fully
//! decoupled from rendering: backends receive frame descriptors and style
//! configuration, and partial rendering never affects the numeric result.
//!
//! ## Example
//!
//! ```rust
//! use estimar::prelude::*;
//!
//! let config = EstimarConfig::builder().frames(1000).seed(42).build();
//! let mut rng = SampleRng::new(config.seed());
//! let mut renderer = NullRenderer;
//!
//! let result = estimate_sample_mean(default_integrand, &config, &mut rng, &mut renderer)
//!     .expect("estimation succeeds");
//!
//! // ∫₀¹ (x - x²) dx = 1/6
//! assert!((result.estimate - 1.0 / 6.0).abs() < 0.02);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suspicious_operation_groupings,  // False positive for variance = E[X²] - E[X]²
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{AnimationConfig, EstimarConfig, ReproducibilityConfig};
    pub use crate::engine::{
        default_integrand, display_coordinates, estimate_sample_mean, sample_mean, standard_error,
        EstimationResult, FrameDescriptor, FrameSequence, LayoutMode, RectKind, Rectangle,
        RunningMean, Sample, SampleMeanEngine, SampleRng, Sampler,
    };
    pub use crate::error::{EstResult, EstimarError};
    pub use crate::render::{
        CollectRenderer, FrameRenderer, JsonLinesRenderer, NullRenderer, RectangleStyle,
        TextRenderer,
    };
}
