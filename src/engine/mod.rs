//! Core estimation pipeline.
//!
//! Coordinates the subsystems in strict order: sampling, layout computation,
//! frame generation, estimation. Execution is single-threaded and
//! synchronous; the only suspension points are the rendering collaborator's
//! per-frame pauses. Frame consumption and estimate computation are
//! decoupled: the estimate is fixed once the samples are drawn, so partial
//! rendering never corrupts the numeric result.

pub mod estimator;
pub mod frames;
pub mod layout;
pub mod rng;
pub mod sampler;

use serde::{Deserialize, Serialize};

pub use estimator::{sample_mean, standard_error, RunningMean};
pub use frames::{FrameDescriptor, FrameSequence, Frames, RectKind, Rectangle};
pub use layout::{display_coordinates, LayoutMode};
pub use rng::SampleRng;
pub use sampler::{Sample, Sampler};

use crate::config::EstimarConfig;
use crate::error::EstResult;
use crate::render::FrameRenderer;

/// The default integrand, x ↦ x − x², with ∫₀¹ = 1/6.
#[must_use]
pub fn default_integrand(x: f64) -> f64 {
    x - x * x
}

/// Result of a sample-mean estimation.
///
/// Computed once per invocation and returned regardless of whether any
/// frames were rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Sampled points, in draw order.
    pub x: Vec<f64>,
    /// Integrand values, in draw order.
    pub y: Vec<f64>,
    /// Sample count.
    pub n: usize,
    /// Sample-mean estimate of ∫₀¹ f(x) dx.
    pub estimate: f64,
}

impl EstimationResult {
    fn from_samples(samples: &[Sample]) -> Self {
        let x: Vec<f64> = samples.iter().map(|s| s.x).collect();
        let y: Vec<f64> = samples.iter().map(|s| s.y).collect();
        let estimate = sample_mean(&y);
        Self {
            n: samples.len(),
            x,
            y,
            estimate,
        }
    }

    /// The samples as (index, x, y) triples.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .enumerate()
            .map(|(k, (&x, &y))| Sample { index: k + 1, x, y })
    }

    /// Standard error of the estimate, `sqrt(Var(y) / n)`.
    ///
    /// Derived on demand from the stored values; the O(1/n) variance of the
    /// estimate is a known accuracy limitation of the method.
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        standard_error(&self.y)
    }

    /// 95% confidence interval, `estimate ± 1.96 * standard_error`.
    #[must_use]
    pub fn confidence_interval(&self) -> (f64, f64) {
        let half = 1.96 * self.standard_error();
        (self.estimate - half, self.estimate + half)
    }
}

/// Sample-mean Monte Carlo estimation engine.
///
/// Constructed from a validated configuration; each call draws a fresh,
/// independent sample set from the caller-supplied RNG.
#[derive(Debug, Clone)]
pub struct SampleMeanEngine {
    config: EstimarConfig,
}

impl SampleMeanEngine {
    /// Create an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration fails semantic validation.
    pub fn new(config: EstimarConfig) -> EstResult<Self> {
        config.validate_semantic()?;
        Ok(Self { config })
    }

    /// Engine with the given sample count and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `frames < 1`.
    pub fn with_frames(frames: usize) -> EstResult<Self> {
        Self::new(EstimarConfig::builder().frames(frames).build())
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &EstimarConfig {
        &self.config
    }

    /// Draw the sample set and compute the estimate, no frames.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a bad sample count and
    /// `FunctionEvaluation` if the integrand produces a non-finite value.
    pub fn run<F>(&self, f: F, rng: &mut SampleRng) -> EstResult<EstimationResult>
    where
        F: Fn(f64) -> f64,
    {
        let sampler = Sampler::new(self.config.frames())?;
        let samples = sampler.draw(f, rng)?;
        Ok(EstimationResult::from_samples(&samples))
    }

    /// Draw the sample set and build its frame sequence alongside the
    /// result, without rendering anything.
    ///
    /// The sequence can be materialized eagerly or consumed lazily; either
    /// way the returned result is already final.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::run`].
    pub fn frames<F>(
        &self,
        f: F,
        rng: &mut SampleRng,
    ) -> EstResult<(FrameSequence, EstimationResult)>
    where
        F: Fn(f64) -> f64,
    {
        let sampler = Sampler::new(self.config.frames())?;
        let samples = sampler.draw(f, rng)?;
        let result = EstimationResult::from_samples(&samples);

        let xx = display_coordinates(&result.x, self.config.layout_mode(), rng);
        let sequence = FrameSequence::new(xx, result.y.clone())?;

        Ok((sequence, result))
    }

    /// Run the full animation: one `render_frame` + `pause` per sample, in
    /// sequence order, then return the estimate.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::run`], plus `Rendering` when the backend
    /// fails; backend failures abort the call without retry.
    pub fn animate<F>(
        &self,
        f: F,
        rng: &mut SampleRng,
        renderer: &mut dyn FrameRenderer,
    ) -> EstResult<EstimationResult>
    where
        F: Fn(f64) -> f64,
    {
        let (sequence, result) = self.frames(f, rng)?;

        for frame in &sequence {
            renderer.render_frame(&frame, &self.config.style)?;
            renderer.pause()?;
        }

        Ok(result)
    }
}

/// Estimate ∫₀¹ f(x) dx by sample-mean Monte Carlo, animating the
/// accumulation of one rectangle per sample.
///
/// Sample count, layout mode, rectangle styles, and pass-through rendering
/// options all come from `config`; randomness (sampling and layout
/// tie-breaking alike) comes from `rng`.
///
/// # Errors
///
/// See [`SampleMeanEngine::animate`].
pub fn estimate_sample_mean<F>(
    f: F,
    config: &EstimarConfig,
    rng: &mut SampleRng,
    renderer: &mut dyn FrameRenderer,
) -> EstResult<EstimationResult>
where
    F: Fn(f64) -> f64,
{
    SampleMeanEngine::new(config.clone())?.animate(f, rng, renderer)
}
