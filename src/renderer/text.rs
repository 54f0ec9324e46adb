//! Bitmap font text rendering for the pixel canvas.
//!
//! Glyphs are 8×8 cells scaled by a whole factor chosen from the requested
//! size (16 px → 2). Row 7 of each cell is the descender row, so the
//! baseline sits 7 rows below the cell top.

use super::{Canvas, TextAlign, TextStyle};
use crate::geometry::Point;

const CELL: usize = 8;
const BASELINE_ROW: usize = 7;

/// 8x8 bitmap for the characters labels can contain.
/// Each character is 8 bytes, one per row, most significant bit leftmost.
fn get_char_bitmap(ch: char) -> Option<[u8; 8]> {
    let ch = ch.to_ascii_uppercase();
    Some(match ch {
        'A' => [0x18, 0x24, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00],
        'B' => [0x7C, 0x42, 0x7C, 0x42, 0x42, 0x42, 0x7C, 0x00],
        'C' => [0x3C, 0x42, 0x40, 0x40, 0x40, 0x42, 0x3C, 0x00],
        'F' => [0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x40, 0x00],
        'I' => [0x3E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00],
        'N' => [0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x42, 0x00],
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00],
        '?' => [0x3C, 0x42, 0x02, 0x0C, 0x10, 0x00, 0x10, 0x00],
        _ => return None,
    })
}

/// Whole-pixel scale factor for a glyph cell of `size` pixels.
pub fn glyph_scale(size: f64) -> usize {
    if size.is_finite() {
        (size / CELL as f64).round().max(1.0) as usize
    } else {
        1
    }
}

/// Horizontal advance per character, in pixels.
fn advance(style: &TextStyle) -> usize {
    CELL * glyph_scale(style.size) + usize::from(style.bold)
}

/// Rendered width of `text` in pixels.
pub fn text_width(text: &str, style: &TextStyle) -> usize {
    text.chars().count() * advance(style)
}

/// Whether glyph pixel (px, py) is inked, counting the bold double strike.
fn inked(bitmap: &[u8; 8], px: usize, py: usize, scale: usize, bold: bool) -> bool {
    let bit = |px: usize| {
        let col = px / scale;
        col < CELL && (bitmap[py / scale] >> (7 - col)) & 1 == 1
    };
    bit(px) || (bold && px >= 1 && bit(px - 1))
}

/// Draw `text` with its baseline at `anchor.y`, aligned on `anchor.x`.
pub fn draw_text(canvas: &mut Canvas, text: &str, anchor: Point, style: &TextStyle) {
    if !anchor.is_finite() || text.is_empty() {
        return;
    }
    let scale = glyph_scale(style.size);
    let width = text_width(text, style) as f64;
    let left = match style.align {
        TextAlign::Left => anchor.x,
        TextAlign::Center => anchor.x - width / 2.0,
        TextAlign::Right => anchor.x - width,
    };
    let top = anchor.y - (BASELINE_ROW * scale) as f64;
    // nothing to draw unless the text box overlaps the canvas
    if left + width < 0.0
        || left > canvas.width as f64
        || top + (CELL * scale) as f64 <= 0.0
        || top > canvas.height as f64
    {
        return;
    }
    let left = left.round() as i64;
    let top = top.round() as i64;
    let glyph_width = CELL * scale + usize::from(style.bold);
    let step = advance(style) as i64;

    for (i, ch) in text.chars().enumerate() {
        let bitmap = get_char_bitmap(ch).or_else(|| get_char_bitmap('?'));
        let Some(bitmap) = bitmap else { continue };
        let origin_x = left + i as i64 * step;

        for py in 0..CELL * scale {
            let y = top + py as i64;
            if y < 0 {
                continue;
            }
            for px in 0..glyph_width {
                let x = origin_x + px as i64;
                if x < 0 || !inked(&bitmap, px, py, scale, style.bold) {
                    continue;
                }
                canvas.blend_pixel(x as usize, y as usize, style.color);
            }
        }
    }
}
