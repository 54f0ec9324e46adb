//! Terminal preview using Unicode upper half blocks.
//!
//! Each character cell shows two canvas samples: the foreground colour is
//! the upper one and the background colour the lower one. The canvas is
//! box-filtered down to the terminal width and composited over white.

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use std::io::{self, Write};
use tracing::debug;

use super::DisplayError;
use crate::color::Rgba;
use crate::renderer::Canvas;

const UPPER_HALF: char = '▀';

/// Print `canvas` to stdout, fitted to the current terminal width.
pub fn print(canvas: &Canvas) -> Result<(), DisplayError> {
    let columns = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80);
    let mut out = io::stdout().lock();
    write_preview(canvas, columns, &mut out)
}

/// Average of the canvas box `[x0, x1) × [y0, y1)` over a white page.
fn sample(canvas: &Canvas, x0: usize, x1: usize, y0: usize, y1: usize) -> Rgba {
    if x0 >= x1 || y0 >= y1 {
        return Rgba::WHITE;
    }
    let mut sum = [0u32; 3];
    for y in y0..y1 {
        for x in x0..x1 {
            let px = canvas.get_pixel(x, y).over(Rgba::WHITE);
            sum[0] += px.r as u32;
            sum[1] += px.g as u32;
            sum[2] += px.b as u32;
        }
    }
    let n = ((x1 - x0) * (y1 - y0)) as u32;
    Rgba::opaque((sum[0] / n) as u8, (sum[1] / n) as u8, (sum[2] / n) as u8)
}

fn term_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Write a half-block rendering of `canvas`, at most `columns` wide, to `out`.
pub fn write_preview<W: Write>(canvas: &Canvas, columns: usize, out: &mut W) -> Result<(), DisplayError> {
    if canvas.width == 0 || canvas.height == 0 {
        return Ok(());
    }
    let cols = columns.clamp(1, canvas.width);
    let step = canvas.width as f64 / cols as f64;
    let sample_rows = ((canvas.height as f64 / step).round() as usize).max(1);
    debug!(cols, sample_rows, "terminal preview size");

    let edge = |i: usize, limit: usize| ((i as f64 * step).round() as usize).min(limit);
    let cell = |col: usize, row: usize| {
        if row >= sample_rows {
            return Rgba::WHITE;
        }
        sample(
            canvas,
            edge(col, canvas.width),
            edge(col + 1, canvas.width),
            edge(row, canvas.height),
            edge(row + 1, canvas.height),
        )
    };

    for row in (0..sample_rows).step_by(2) {
        for col in 0..cols {
            queue!(
                out,
                SetForegroundColor(term_color(cell(col, row))),
                SetBackgroundColor(term_color(cell(col, row + 1))),
                Print(UPPER_HALF)
            )?;
        }
        queue!(out, ResetColor, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Surface;

    #[test]
    fn preview_has_one_cell_per_two_sample_rows() {
        let canvas = Canvas::new(20, 20);
        let mut out = Vec::new();
        write_preview(&canvas, 10, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(UPPER_HALF).count(), 10 * 5);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn narrow_canvas_is_not_upscaled() {
        let canvas = Canvas::new(4, 4);
        let mut out = Vec::new();
        write_preview(&canvas, 80, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(UPPER_HALF).count(), 4 * 2);
    }

    #[test]
    fn colors_are_composited_over_white() {
        let mut canvas = Canvas::new(2, 2);
        canvas.clear(Rgba::TRANSPARENT);
        assert_eq!(sample(&canvas, 0, 2, 0, 2), Rgba::WHITE);
        canvas.clear(Rgba::opaque(0x27, 0xae, 0x60));
        assert_eq!(sample(&canvas, 0, 2, 0, 2), Rgba::opaque(0x27, 0xae, 0x60));
    }

    #[test]
    fn empty_canvas_writes_nothing() {
        let mut out = Vec::new();
        write_preview(&Canvas::new(0, 0), 80, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
