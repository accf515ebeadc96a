//! Rendering collaborators for the convergence animation.
//!
//! The core hands each [`FrameDescriptor`] to a [`FrameRenderer`] together
//! with the untouched rectangle style configuration; how (and whether) the
//! frame is drawn is entirely the backend's concern, as is pacing via
//! `pause()`. Backends provided here:
//!
//! - [`NullRenderer`] — discards frames (estimation without animation)
//! - [`CollectRenderer`] — materializes frames, for tests and replay
//! - [`TextRenderer`] — one log line per frame with the running estimate
//! - [`JsonLinesRenderer`] — streaming JSON Lines export of frames
//! - `AnsiRenderer` — live terminal animation (behind the `tui` feature)

use std::io::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::estimator::RunningMean;
use crate::engine::frames::FrameDescriptor;
use crate::error::{EstResult, EstimarError};

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "tui")]
pub use tui::AnsiRenderer;

/// Style configuration forwarded untouched to the rendering backend.
///
/// `settled` and `current` name the visual styles for the two rectangle
/// kinds (color names by convention). `extra` carries ordered pass-through
/// options the core does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectangleStyle {
    /// Style for rectangles of already-processed samples.
    #[serde(default = "default_settled_style")]
    pub settled: String,
    /// Style for the rectangle added in the present frame.
    #[serde(default = "default_current_style")]
    pub current: String,
    /// Backend-specific options, forwarded verbatim in order.
    #[serde(default)]
    pub extra: IndexMap<String, String>,
}

fn default_settled_style() -> String {
    "gray".to_string()
}

fn default_current_style() -> String {
    "black".to_string()
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            settled: default_settled_style(),
            current: default_current_style(),
            extra: IndexMap::new(),
        }
    }
}

/// Rendering backend consumed by the estimation core.
///
/// `render_frame` and `pause` are invoked once per frame, in sequence order.
/// Backend failures are opaque to the core and propagate without retry.
pub trait FrameRenderer {
    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an opaque `Rendering` error on backend failure.
    fn render_frame(&mut self, frame: &FrameDescriptor, style: &RectangleStyle) -> EstResult<()>;

    /// Suspension point between frames; pacing belongs to the backend.
    ///
    /// # Errors
    ///
    /// Returns an opaque `Rendering` error on backend failure.
    fn pause(&mut self) -> EstResult<()>;
}

/// Discards every frame. Useful when only the estimate is wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl FrameRenderer for NullRenderer {
    fn render_frame(&mut self, _frame: &FrameDescriptor, _style: &RectangleStyle) -> EstResult<()> {
        Ok(())
    }

    fn pause(&mut self) -> EstResult<()> {
        Ok(())
    }
}

/// Materializes the frame stream for inspection.
#[derive(Debug, Clone, Default)]
pub struct CollectRenderer {
    frames: Vec<FrameDescriptor>,
    pauses: usize,
}

impl CollectRenderer {
    /// Create an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames rendered so far, in order.
    #[must_use]
    pub fn frames(&self) -> &[FrameDescriptor] {
        &self.frames
    }

    /// Number of `pause()` calls observed.
    #[must_use]
    pub const fn pauses(&self) -> usize {
        self.pauses
    }

    /// Consume the collector, returning the frames.
    #[must_use]
    pub fn into_frames(self) -> Vec<FrameDescriptor> {
        self.frames
    }
}

impl FrameRenderer for CollectRenderer {
    fn render_frame(&mut self, frame: &FrameDescriptor, _style: &RectangleStyle) -> EstResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn pause(&mut self) -> EstResult<()> {
        self.pauses += 1;
        Ok(())
    }
}

/// Logs one line per frame with the running estimate.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    running: RunningMean,
}

impl<W: Write> TextRenderer<W> {
    /// Create a text renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            running: RunningMean::new(),
        }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextRenderer<std::io::Stdout> {
    /// Text renderer on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> FrameRenderer for TextRenderer<W> {
    fn render_frame(&mut self, frame: &FrameDescriptor, style: &RectangleStyle) -> EstResult<()> {
        self.running.push(frame.current.height);

        writeln!(
            self.out,
            "frame {:>4}/{}  x = {:.4}  y = {:+.6}  [{}]  running estimate = {:.6}",
            frame.step,
            frame.n,
            frame.tick,
            frame.current.height,
            style.current,
            self.running.mean(),
        )
        .map_err(|e| EstimarError::rendering(e.to_string()))
    }

    fn pause(&mut self) -> EstResult<()> {
        self.out
            .flush()
            .map_err(|e| EstimarError::rendering(e.to_string()))
    }
}

/// Streams frames as JSON Lines, one record per frame.
#[derive(Debug)]
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

/// One exported record: the frame plus the untouched style configuration.
#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: &'a FrameDescriptor,
    style: &'a RectangleStyle,
}

impl<W: Write> JsonLinesRenderer<W> {
    /// Create a JSON Lines renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameRenderer for JsonLinesRenderer<W> {
    fn render_frame(&mut self, frame: &FrameDescriptor, style: &RectangleStyle) -> EstResult<()> {
        let record = FrameRecord { frame, style };
        let line = serde_json::to_string(&record)
            .map_err(|e| EstimarError::serialization(e.to_string()))?;

        writeln!(self.out, "{line}").map_err(|e| EstimarError::rendering(e.to_string()))
    }

    fn pause(&mut self) -> EstResult<()> {
        Ok(())
    }
}
