//! Pixel renderer for the annotated triangle.
//!
//! Painting goes through the [`Surface`] trait. [`Canvas`] is the owned
//! RGBA pixel buffer that implements it; output backends (PNG file,
//! terminal half-block preview) read the canvas once painting is done.

pub mod layout;
pub mod shapes;
pub mod text;

use tracing::debug;

use crate::color::Rgba;
use crate::config::{LayoutConfig, StyleConfig};
use crate::geometry::{interior_angles, to_render_space, AngleSet, Point, RenderTransform, Triangle, Vertex};

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    #[cfg_attr(not(test), allow(dead_code))]
    Left,
    Center,
    #[cfg_attr(not(test), allow(dead_code))]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Rgba,
    /// Glyph cell height in pixels.
    pub size: f64,
    pub bold: bool,
    pub align: TextAlign,
}

/// Immediate-mode 2D drawing surface.
///
/// Anchors for text are on the baseline. Primitives with non-finite
/// coordinates paint nothing.
pub trait Surface {
    fn clear(&mut self, color: Rgba);
    /// Closed polygon through `points`.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba);
    /// Outline of the closed polygon through `points`.
    fn stroke_polygon(&mut self, points: &[Point], width: f64, color: Rgba);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);
    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle);
}

/// Owned RGBA pixel buffer.
///
/// Internal format is 4 bytes per pixel in **RGBA** order with straight
/// (non-premultiplied) alpha.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
        }
    }

    /// Composite `color` over the pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let dst = Rgba::from_array([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]);
        self.data[idx..idx + 4].copy_from_slice(&color.over(dst).to_array());
    }

    /// Read the pixel at (x, y); transparent when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgba {
        if x >= self.width || y >= self.height {
            return Rgba::TRANSPARENT;
        }
        let idx = (y * self.width + x) * 4;
        Rgba::from_array([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }
}

impl Surface for Canvas {
    fn clear(&mut self, color: Rgba) {
        let pixel = color.to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&pixel);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        shapes::fill_polygon(self, points, color);
    }

    fn stroke_polygon(&mut self, points: &[Point], width: f64, color: Rgba) {
        shapes::stroke_polygon(self, points, width, color);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        shapes::fill_circle(self, center, radius, color);
    }

    fn fill_text(&mut self, text: &str, anchor: Point, style: &TextStyle) {
        text::draw_text(self, text, anchor, style);
    }
}

/// Everything the paint stage needs, computed without touching a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    /// Triangle in render space.
    pub triangle: Triangle,
    pub angles: AngleSet,
    pub transform: RenderTransform,
    pub label_pull: f64,
}

impl Scene {
    pub fn compose(raw: &Triangle, layout: &LayoutConfig) -> Self {
        let angles = interior_angles(raw);
        let (triangle, transform) = to_render_space(raw, layout);
        debug!(?angles, angle_sum = angles.sum(), ?transform, "composed scene");
        Self {
            triangle,
            angles,
            transform,
            label_pull: layout.label_pull,
        }
    }
}

/// Main entry point: paint a complete scene onto the surface.
pub fn render_scene<S: Surface + ?Sized>(surface: &mut S, scene: &Scene, style: &StyleConfig) {
    surface.clear(style.background);

    let points = scene.triangle.points();
    surface.fill_polygon(&points, style.fill);
    surface.stroke_polygon(&points, style.stroke_width, style.stroke);

    let text_style = TextStyle {
        color: style.text_color,
        size: style.font_size,
        bold: true,
        align: TextAlign::Center,
    };

    for vertex in Vertex::ALL {
        let point = scene.triangle[vertex];
        surface.fill_circle(point, style.marker_radius, style.marker_colors.get(vertex));
        let anchor = layout::vertex_label_anchor(point, style.label_offset);
        surface.fill_text(&vertex.to_string(), anchor, &text_style);
    }

    let anchors = layout::angle_label_anchors(&scene.triangle, scene.label_pull);
    for vertex in Vertex::ALL {
        surface.fill_text(&scene.angles.label(vertex), anchors[vertex], &text_style);
    }
}
