//! Live terminal animation backend.
//!
//! Draws each frame as a character-cell bar chart: settled rectangles in the
//! configured settled style, the current rectangle highlighted, a marginal
//! tick row for the current sample, and a status line with the running
//! estimate. The full chart is redrawn every frame; redraw policy is a
//! backend decision, not a core concern.

use std::io::Write;
use std::time::Duration;

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor::MoveTo, queue, style::Print};

use super::{FrameRenderer, RectangleStyle};
use crate::engine::estimator::RunningMean;
use crate::engine::frames::{FrameDescriptor, RectKind};
use crate::error::{EstResult, EstimarError};

/// Character cell content for one grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Settled,
    Current,
    Axis,
}

/// ANSI terminal renderer with per-frame pacing.
#[derive(Debug)]
pub struct AnsiRenderer<W: Write> {
    out: W,
    /// Chart width in character cells.
    width: usize,
    /// Chart height in character cells.
    height: usize,
    /// Sleep duration applied in `pause()`.
    interval: Duration,
    running: RunningMean,
}

impl<W: Write> AnsiRenderer<W> {
    /// Create a renderer drawing a `width` x `height` cell chart.
    pub fn new(out: W, width: usize, height: usize, interval: Duration) -> Self {
        Self {
            out,
            width: width.max(10),
            height: height.max(4),
            interval,
            running: RunningMean::new(),
        }
    }

    fn err(e: impl std::fmt::Display) -> EstimarError {
        EstimarError::rendering(e.to_string())
    }

    /// Rasterize the frame's rectangles onto a character grid.
    fn rasterize(&self, frame: &FrameDescriptor) -> Vec<Vec<Cell>> {
        let mut grid = vec![vec![Cell::Empty; self.width]; self.height];

        // Vertical bounds always include the axis
        let mut y_min = 0.0f64;
        let mut y_max = 0.0f64;
        for rect in frame.rectangles() {
            y_min = y_min.min(rect.height);
            y_max = y_max.max(rect.height);
        }
        if (y_max - y_min).abs() < f64::EPSILON {
            y_max = y_min + 1.0;
        }
        let y_span = y_max - y_min;

        let row_of = |y: f64| -> usize {
            let t = (y_max - y) / y_span;
            ((t * (self.height - 1) as f64).round() as usize).min(self.height - 1)
        };
        let col_of = |x: f64| -> usize {
            ((x.clamp(0.0, 1.0) * (self.width - 1) as f64).round() as usize).min(self.width - 1)
        };

        // Axis row at y = 0
        let axis_row = row_of(0.0);
        for col in 0..self.width {
            grid[axis_row][col] = Cell::Axis;
        }

        // Settled first so the current rectangle stays visible on overlap
        for rect in frame.rectangles() {
            let (x0, x1) = rect.x_extent();
            let (r0, r1) = {
                let (y0, y1) = rect.y_extent();
                (row_of(y1), row_of(y0))
            };
            let cell = match rect.kind {
                RectKind::Settled => Cell::Settled,
                RectKind::Current => Cell::Current,
            };

            for row in grid.iter_mut().take(r1 + 1).skip(r0) {
                for col in col_of(x0)..=col_of(x1) {
                    row[col] = cell;
                }
            }
        }

        grid
    }

    fn draw_row(&mut self, row: &[Cell], settled: Color, current: Color) -> EstResult<()> {
        let mut col = 0;
        while col < row.len() {
            let cell = row[col];
            let mut run = String::new();
            while col < row.len() && row[col] == cell {
                run.push(match cell {
                    Cell::Empty => ' ',
                    Cell::Settled => '▒',
                    Cell::Current => '█',
                    Cell::Axis => '─',
                });
                col += 1;
            }

            match cell {
                Cell::Settled => {
                    queue!(self.out, SetForegroundColor(settled), Print(run), ResetColor)
                }
                Cell::Current => {
                    queue!(self.out, SetForegroundColor(current), Print(run), ResetColor)
                }
                _ => queue!(self.out, Print(run)),
            }
            .map_err(Self::err)?;
        }

        queue!(self.out, Print("\r\n")).map_err(Self::err)?;
        Ok(())
    }
}

/// Map a style name onto a terminal color. Unknown names fall back to the
/// terminal default foreground.
fn color_for(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        "red" => Color::Red,
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        _ => Color::Reset,
    }
}

impl<W: Write> FrameRenderer for AnsiRenderer<W> {
    fn render_frame(&mut self, frame: &FrameDescriptor, style: &RectangleStyle) -> EstResult<()> {
        self.running.push(frame.current.height);

        let settled = color_for(&style.settled);
        let current = color_for(&style.current);
        let grid = self.rasterize(frame);

        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0)).map_err(Self::err)?;

        for row in &grid {
            self.draw_row(row, settled, current)?;
        }

        // Marginal tick row for the current sample
        let tick_col = ((frame.tick.clamp(0.0, 1.0) * (self.width - 1) as f64).round() as usize)
            .min(self.width - 1);
        let mut tick_row = " ".repeat(self.width);
        tick_row.replace_range(tick_col..=tick_col, "▲");
        queue!(
            self.out,
            SetForegroundColor(current),
            Print(tick_row),
            ResetColor,
            Print("\r\n")
        )
        .map_err(Self::err)?;

        let status = format!(
            "frame {}/{}  running estimate = {:.6}",
            frame.step,
            frame.n,
            self.running.mean()
        );
        queue!(self.out, Print(status), Print("\r\n")).map_err(Self::err)?;

        self.out.flush().map_err(Self::err)?;
        Ok(())
    }

    fn pause(&mut self) -> EstResult<()> {
        std::thread::sleep(self.interval);
        Ok(())
    }
}
