//! Triangle geometry: points, vertex labels and the two pure stages of the
//! pipeline (interior angles and fitting into render space).

pub mod angles;
pub mod viewport;

use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

pub use angles::{interior_angles, AngleSet};
pub use viewport::{to_render_space, BoundingBox, RenderTransform};

/// A point in either input space or render space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point `t` of the way from `self` toward `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Vertex label of a triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    A,
    B,
    C,
}

impl Vertex {
    pub const ALL: [Vertex; 3] = [Vertex::A, Vertex::B, Vertex::C];

    pub fn letter(self) -> char {
        match self {
            Vertex::A => 'A',
            Vertex::B => 'B',
            Vertex::C => 'C',
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Three labeled points. Side `a` is opposite vertex A, and so on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub const fn new(a: Point, b: Point, c: Point) -> Self {
        Self { a, b, c }
    }

    /// Vertices in A, B, C order.
    pub fn points(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Apply `f` to every vertex, keeping labels.
    pub fn map(&self, mut f: impl FnMut(Point) -> Point) -> Triangle {
        Triangle::new(f(self.a), f(self.b), f(self.c))
    }

    /// Arithmetic mean of the three vertices.
    pub fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    /// Side lengths `(a, b, c)`, each opposite the vertex of the same name.
    pub fn side_lengths(&self) -> (f64, f64, f64) {
        (
            self.b.distance(self.c),
            self.a.distance(self.c),
            self.a.distance(self.b),
        )
    }
}

impl Index<Vertex> for Triangle {
    type Output = Point;

    fn index(&self, vertex: Vertex) -> &Point {
        match vertex {
            Vertex::A => &self.a,
            Vertex::B => &self.b,
            Vertex::C => &self.c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_lengths_are_opposite_their_vertex() {
        let t = Triangle::new(Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0));
        let (a, b, c) = t.side_lengths();
        assert_eq!(a, 5.0);
        assert_eq!(b, 3.0);
        assert_eq!(c, 4.0);
    }

    #[test]
    fn centroid_is_mean_of_vertices() {
        let t = Triangle::new(Point::new(0.0, 0.0), Point::new(6.0, 0.0), Point::new(0.0, 9.0));
        assert_eq!(t.centroid(), Point::new(2.0, 3.0));
    }

    #[test]
    fn index_by_vertex_label() {
        let t = Triangle::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0), Point::new(5.0, 6.0));
        assert_eq!(t[Vertex::B], Point::new(3.0, 4.0));
        let letters: String = Vertex::ALL.iter().map(|v| v.letter()).collect();
        assert_eq!(letters, "ABC");
    }

    #[test]
    fn lerp_pulls_toward_target() {
        let from = Point::new(10.0, 10.0);
        let to = Point::new(20.0, 0.0);
        let p = from.lerp(to, 0.7);
        assert!((p.x - 17.0).abs() < 1e-12 && (p.y - 3.0).abs() < 1e-12, "{p}");
    }
}
