//! Per-frame state computation for the convergence animation.
//!
//! Each frame partitions the samples into settled rectangles (already drawn
//! in earlier frames) and the one current rectangle being added. Frames are
//! produced lazily as an ordered, finite, restartable sequence: the sequence
//! owns its data, and every `iter()` call replays identical frames from
//! scratch. Consumers may materialize all frames eagerly for testing or pull
//! them one at a time under external pacing; either way the numeric estimate
//! is unaffected.

use serde::{Deserialize, Serialize};

use crate::error::{EstResult, EstimarError};

/// Style tag distinguishing settled rectangles from the current one.
///
/// Rendering is a collaborator concern; the tag is the only style data the
/// core produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RectKind {
    /// Rectangle for a sample processed in an earlier frame.
    Settled,
    /// Rectangle for the sample added in the present frame.
    Current,
}

/// Axis-aligned rectangle for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// 1-based sample index this rectangle belongs to.
    pub index: usize,
    /// Horizontal center (the sample's display coordinate).
    pub center: f64,
    /// Horizontal half-width, fixed at `0.5 / n`.
    pub half_width: f64,
    /// Signed height (the sample's function value).
    pub height: f64,
    /// Style tag for the rendering collaborator.
    pub kind: RectKind,
}

impl Rectangle {
    /// Horizontal extent `[center - w, center + w]`.
    #[must_use]
    pub fn x_extent(&self) -> (f64, f64) {
        (self.center - self.half_width, self.center + self.half_width)
    }

    /// Vertical extent `[0, height]`, inverted to `[height, 0]` when the
    /// height is negative.
    #[must_use]
    pub fn y_extent(&self) -> (f64, f64) {
        if self.height < 0.0 {
            (self.height, 0.0)
        } else {
            (0.0, self.height)
        }
    }

    /// Signed area contribution of this rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        2.0 * self.half_width * self.height
    }
}

/// One frame of the animation.
///
/// Frame i carries rectangles for samples 1..i-1 tagged settled and the
/// rectangle for sample i tagged current, plus a marginal tick mark locating
/// the current sample on the axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// 1-based frame number in [1, n].
    pub step: usize,
    /// Total number of frames in the sequence.
    pub n: usize,
    /// Rectangles for samples 1..step-1, in draw order.
    pub settled: Vec<Rectangle>,
    /// Rectangle for sample `step`.
    pub current: Rectangle,
    /// Display coordinate of the current sample, for the marginal tick mark
    /// distinguishing it from all others.
    pub tick: f64,
}

impl FrameDescriptor {
    /// All rectangles of this frame in draw order, settled first.
    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> {
        self.settled.iter().chain(std::iter::once(&self.current))
    }

    /// 1-based indices of the settled samples (always `{1..step-1}`).
    pub fn settled_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.settled.iter().map(|r| r.index)
    }

    /// Whether this is the final frame of the sequence.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.step == self.n
    }
}

/// Ordered, finite, restartable sequence of animation frames.
///
/// Owns the display coordinates and heights; `iter()` borrows them, so
/// re-invoking it yields a bitwise-identical frame sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    /// Display coordinate per sample.
    coords: Vec<f64>,
    /// Function value per sample.
    heights: Vec<f64>,
    /// Fixed rectangle half-width, `0.5 / n`.
    half_width: f64,
}

impl FrameSequence {
    /// Build a frame sequence from display coordinates and function values.
    ///
    /// # Errors
    ///
    /// Returns `EmptySequence` when no samples are given, `InvalidArgument`
    /// when the two slices disagree in length.
    pub fn new(coords: Vec<f64>, heights: Vec<f64>) -> EstResult<Self> {
        if coords.is_empty() {
            return Err(EstimarError::EmptySequence);
        }
        if coords.len() != heights.len() {
            return Err(EstimarError::invalid_argument(format!(
                "coordinate and height counts differ: {} vs {}",
                coords.len(),
                heights.len()
            )));
        }

        let half_width = 0.5 / coords.len() as f64;
        Ok(Self {
            coords,
            heights,
            half_width,
        })
    }

    /// Number of frames in the sequence (equals the sample count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// A frame sequence is never empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// The fixed rectangle half-width `0.5 / n`.
    #[must_use]
    pub const fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Rectangle for the 1-based sample index with the given style tag.
    fn rectangle(&self, index: usize, kind: RectKind) -> Rectangle {
        Rectangle {
            index,
            center: self.coords[index - 1],
            half_width: self.half_width,
            height: self.heights[index - 1],
            kind,
        }
    }

    /// Compute the descriptor for 1-based frame `step`, if in range.
    #[must_use]
    pub fn frame(&self, step: usize) -> Option<FrameDescriptor> {
        if step < 1 || step > self.len() {
            return None;
        }

        let settled = (1..step)
            .map(|i| self.rectangle(i, RectKind::Settled))
            .collect();
        let current = self.rectangle(step, RectKind::Current);
        let tick = current.center;

        Some(FrameDescriptor {
            step,
            n: self.len(),
            settled,
            current,
            tick,
        })
    }

    /// Iterate frames 1..n lazily. Each call restarts from frame 1.
    #[must_use]
    pub fn iter(&self) -> Frames<'_> {
        Frames {
            seq: self,
            next_step: 1,
        }
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = FrameDescriptor;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over a [`FrameSequence`].
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    seq: &'a FrameSequence,
    next_step: usize,
}

impl Iterator for Frames<'_> {
    type Item = FrameDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.seq.frame(self.next_step)?;
        self.next_step += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.len().saturating_sub(self.next_step - 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
