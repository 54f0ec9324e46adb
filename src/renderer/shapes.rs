//! Shape rasterization onto the canvas.
//!
//! A pixel is covered when its centre (x + 0.5, y + 0.5) lies inside the
//! shape. Each covered pixel is blended exactly once per primitive.

use std::ops::Range;

use super::Canvas;
use crate::color::Rgba;
use crate::geometry::{BoundingBox, Point};

/// Pixel indices whose centres can fall in `[lo, hi]`, clipped to `0..limit`.
fn pixel_span(lo: f64, hi: f64, limit: usize) -> Option<Range<usize>> {
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let start = (lo - 0.5).ceil().max(0.0);
    let end = ((hi - 0.5).floor() + 1.0).min(limit as f64);
    if start >= end {
        return None;
    }
    Some(start as usize..end as usize)
}

fn all_finite(points: &[Point]) -> bool {
    points.iter().all(|p| p.is_finite())
}

/// Even-odd scanline fill of the closed polygon through `points`.
pub fn fill_polygon(canvas: &mut Canvas, points: &[Point], color: Rgba) {
    if points.len() < 3 || !all_finite(points) {
        return;
    }
    let bounds = BoundingBox::of(points);
    let Some(rows) = pixel_span(bounds.min.y, bounds.max.y, canvas.height) else {
        return;
    };

    let mut crossings = Vec::with_capacity(points.len());
    for y in rows {
        let yc = y as f64 + 0.5;
        crossings.clear();
        for (i, &p0) in points.iter().enumerate() {
            let p1 = points[(i + 1) % points.len()];
            // half-open so a vertex shared by two edges is counted once
            if (p0.y <= yc && yc < p1.y) || (p1.y <= yc && yc < p0.y) {
                let t = (yc - p0.y) / (p1.y - p0.y);
                crossings.push(p0.x + t * (p1.x - p0.x));
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for pair in crossings.chunks_exact(2) {
            // centres in [left, right)
            let start = (pair[0] - 0.5).ceil().max(0.0);
            let end = (pair[1] - 0.5).ceil().min(canvas.width as f64);
            if start >= end {
                continue;
            }
            for x in start as usize..end as usize {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}

/// Distance from `p` to the segment `a`–`b`.
fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let ap = p - a;
    let t = ((ap.x * ab.x + ap.y * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Outline of the closed polygon through `points`, `width` pixels wide.
pub fn stroke_polygon(canvas: &mut Canvas, points: &[Point], width: f64, color: Rgba) {
    if points.is_empty() || !all_finite(points) || !(width > 0.0) {
        return;
    }
    let half = width / 2.0;
    let bounds = BoundingBox::of(points);
    let (Some(rows), Some(cols)) = (
        pixel_span(bounds.min.y - half, bounds.max.y + half, canvas.height),
        pixel_span(bounds.min.x - half, bounds.max.x + half, canvas.width),
    ) else {
        return;
    };

    for y in rows {
        for x in cols.clone() {
            let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            let covered = points.iter().enumerate().any(|(i, &a)| {
                let b = points[(i + 1) % points.len()];
                distance_to_segment(centre, a, b) <= half
            });
            if covered {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}

pub fn fill_circle(canvas: &mut Canvas, center: Point, radius: f64, color: Rgba) {
    if !center.is_finite() || !(radius > 0.0) {
        return;
    }
    let (Some(rows), Some(cols)) = (
        pixel_span(center.y - radius, center.y + radius, canvas.height),
        pixel_span(center.x - radius, center.x + radius, canvas.width),
    ) else {
        return;
    };

    for y in rows {
        for x in cols.clone() {
            let centre = Point::new(x as f64 + 0.5, y as f64 + 0.5);
            if centre.distance(center) <= radius {
                canvas.blend_pixel(x, y, color);
            }
        }
    }
}
