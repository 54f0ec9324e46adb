//! Fitting a triangle's bounding box into the padded square canvas.

use tracing::debug;

use super::{Point, Triangle};
use crate::config::LayoutConfig;

/// Axis-aligned bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// A NaN coordinate makes that axis of the box NaN.
    pub fn of(points: &[Point]) -> Self {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = nan_min(min.x, p.x);
            min.y = nan_min(min.y, p.y);
            max.x = nan_max(max.x, p.x);
            max.y = nan_max(max.y, p.y);
        }
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

fn nan_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

fn nan_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

/// Uniform scale plus translation from input space to render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTransform {
    pub scale: f64,
    /// Render-space position of `origin`.
    pub offset: Point,
    /// Bounding-box minimum of the input triangle.
    pub origin: Point,
}

impl RenderTransform {
    pub fn apply(&self, p: Point) -> Point {
        self.offset + (p - self.origin) * self.scale
    }
}

/// Compute the transform that fits `triangle` inside the padded canvas.
///
/// The scale is capped at `max_scale`. A bounding box with no width or no
/// height (anything at or below `degenerate_epsilon`) falls back to scale 1.
pub fn fit(triangle: &Triangle, layout: &LayoutConfig) -> RenderTransform {
    let bounds = BoundingBox::of(&triangle.points());
    let width = bounds.width();
    let height = bounds.height();
    let available = layout.available_space();

    let mut scale = nan_min(available / width, available / height);
    if scale > layout.max_scale {
        scale = layout.max_scale;
    }
    let degenerate = width <= layout.degenerate_epsilon || height <= layout.degenerate_epsilon;
    if degenerate {
        scale = 1.0;
    }

    debug!(width, height, scale, degenerate, "fitted bounding box");

    RenderTransform {
        scale,
        offset: Point::new(layout.padding, layout.padding),
        origin: bounds.min,
    }
}

/// Map `triangle` into render space, returning the mapped triangle and the
/// transform used.
pub fn to_render_space(triangle: &Triangle, layout: &LayoutConfig) -> (Triangle, RenderTransform) {
    let transform = fit(triangle, layout);
    (triangle.map(|p| transform.apply(p)), transform)
}
