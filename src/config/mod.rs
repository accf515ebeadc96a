//! Animation configuration with YAML schema and validation.
//!
//! Frame count, pacing, seed, layout, and styles are an explicit, validated
//! configuration struct passed into the engine; no process-wide state links
//! unrelated calls. Mistake-proofing comes in three layers: type-safe
//! structs, schema validation via serde, and runtime semantic validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::layout::LayoutMode;
use crate::error::{EstResult, EstimarError};
use crate::render::RectangleStyle;

/// Top-level estimation configuration.
///
/// Loaded from YAML files with full schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EstimarConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Animation settings (frame count and pacing).
    #[validate(nested)]
    #[serde(default)]
    pub animation: AnimationConfig,

    /// Reproducibility settings.
    #[validate(nested)]
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Display-coordinate layout settings.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Rectangle styles forwarded untouched to the rendering backend.
    #[serde(default)]
    pub style: RectangleStyle,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl EstimarConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, YAML parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> EstResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> EstResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> EstimarConfigBuilder {
        EstimarConfigBuilder::default()
    }

    /// Validate semantic constraints beyond schema.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero frame count and `Config` for a
    /// broken pacing interval.
    pub fn validate_semantic(&self) -> EstResult<()> {
        if self.animation.frames < 1 {
            return Err(EstimarError::invalid_argument(format!(
                "frame count must be at least 1, got {}",
                self.animation.frames
            )));
        }

        let interval = self.animation.interval_secs;
        if !interval.is_finite() || interval < 0.0 {
            return Err(EstimarError::config(format!(
                "pacing interval must be finite and non-negative, got {interval}"
            )));
        }

        Ok(())
    }

    /// Number of samples / animation frames.
    #[must_use]
    pub const fn frames(&self) -> usize {
        self.animation.frames
    }

    /// Master seed for sampling and tie-breaking.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.reproducibility.seed
    }

    /// Layout mode for display coordinates.
    #[must_use]
    pub const fn layout_mode(&self) -> LayoutMode {
        self.layout.mode
    }
}

impl Default for EstimarConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            animation: AnimationConfig::default(),
            reproducibility: ReproducibilityConfig::default(),
            layout: LayoutConfig::default(),
            style: RectangleStyle::default(),
        }
    }
}

/// Animation frame count and pacing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnimationConfig {
    /// Number of samples, one animation frame each.
    #[validate(range(min = 1))]
    #[serde(default = "default_frames")]
    pub frames: usize,

    /// Suggested pause between frames in seconds, consumed by pacing
    /// backends. The core never sleeps.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
}

const fn default_frames() -> usize {
    50
}

const fn default_interval_secs() -> f64 {
    1.0
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            interval_secs: default_interval_secs(),
        }
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReproducibilityConfig {
    /// Master seed for all RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Display-coordinate layout settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Exact positions or rank-preserving adjusted slots.
    #[serde(default)]
    pub mode: LayoutMode,
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct EstimarConfigBuilder {
    frames: Option<usize>,
    interval_secs: Option<f64>,
    seed: Option<u64>,
    layout: Option<LayoutMode>,
    style: Option<RectangleStyle>,
}

impl EstimarConfigBuilder {
    /// Set the number of samples / frames.
    #[must_use]
    pub const fn frames(mut self, frames: usize) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Set the pacing interval in seconds.
    #[must_use]
    pub const fn interval_secs(mut self, interval: f64) -> Self {
        self.interval_secs = Some(interval);
        self
    }

    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the layout mode.
    #[must_use]
    pub const fn layout(mut self, mode: LayoutMode) -> Self {
        self.layout = Some(mode);
        self
    }

    /// Set the rectangle styles.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // RectangleStyle doesn't impl Copy
    pub fn style(mut self, style: RectangleStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> EstimarConfig {
        let mut config = EstimarConfig::default();

        if let Some(frames) = self.frames {
            config.animation.frames = frames;
        }
        if let Some(interval) = self.interval_secs {
            config.animation.interval_secs = interval;
        }
        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(mode) = self.layout {
            config.layout.mode = mode;
        }
        if let Some(style) = self.style {
            config.style = style;
        }

        config
    }
}
