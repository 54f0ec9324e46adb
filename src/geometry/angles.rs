//! Interior angles from vertex coordinates via the law of cosines.

use std::ops::Index;

use super::{Triangle, Vertex};

/// Interior angle at each vertex, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSet {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl AngleSet {
    pub fn sum(&self) -> f64 {
        self.a + self.b + self.c
    }

    /// `"A: 37.4"` style label for one vertex.
    pub fn label(&self, vertex: Vertex) -> String {
        format!("{}: {:.1}", vertex, self[vertex])
    }
}

impl Index<Vertex> for AngleSet {
    type Output = f64;

    fn index(&self, vertex: Vertex) -> &f64 {
        match vertex {
            Vertex::A => &self.a,
            Vertex::B => &self.b,
            Vertex::C => &self.c,
        }
    }
}

/// Angle in degrees opposite side `opposite`, between the sides `adj1` and `adj2`.
///
/// Zero-length adjacent sides divide by zero and give NaN. Rounding can push
/// the cosine of a near-degenerate triangle just past ±1, so it is clamped.
fn opposite_angle(opposite: f64, adj1: f64, adj2: f64) -> f64 {
    let cos = (adj1 * adj1 + adj2 * adj2 - opposite * opposite) / (2.0 * adj1 * adj2);
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Compute the three interior angles of `triangle`.
pub fn interior_angles(triangle: &Triangle) -> AngleSet {
    let (a, b, c) = triangle.side_lengths();
    AngleSet {
        a: opposite_angle(a, b, c),
        b: opposite_angle(b, a, c),
        c: opposite_angle(c, a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use proptest::prelude::*;

    fn tri(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> Triangle {
        Triangle::new(Point::new(ax, ay), Point::new(bx, by), Point::new(cx, cy))
    }

    #[test]
    fn equilateral_angles_are_sixty() {
        let angles = interior_angles(&tri(0.0, 0.0, 100.0, 0.0, 50.0, 86.6));
        for v in Vertex::ALL {
            assert!((angles[v] - 60.0).abs() < 0.05, "{} = {}", v, angles[v]);
        }
    }

    #[test]
    fn right_triangle_three_four_five() {
        let angles = interior_angles(&tri(0.0, 0.0, 4.0, 0.0, 0.0, 3.0));
        assert!((angles.a - 90.0).abs() < 1e-9);
        assert!((angles.b - 36.869_897_645).abs() < 1e-6);
        assert!((angles.c - 53.130_102_354).abs() < 1e-6);
    }

    #[test]
    fn default_input_triangle() {
        let angles = interior_angles(&tri(0.0, 0.0, 100.0, 0.0, 50.0, 100.0));
        assert!((angles.a - angles.b).abs() < 1e-9);
        assert!((angles.a - 63.434_948_822).abs() < 1e-6);
        assert!((angles.sum() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_points_give_nan() {
        let angles = interior_angles(&tri(1.0, 1.0, 1.0, 1.0, 5.0, 2.0));
        assert!(angles.c.is_nan());
    }

    #[test]
    fn flat_triangle_clamps_instead_of_nan() {
        let angles = interior_angles(&tri(0.0, 0.0, 1.0, 1e-9, 3.0, 3e-9));
        for v in Vertex::ALL {
            assert!(!angles[v].is_nan());
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let t = tri(-3.5, 2.25, 17.0, -4.0, 8.0, 11.5);
        assert_eq!(interior_angles(&t), interior_angles(&t));
    }

    #[test]
    fn labels_use_one_decimal() {
        let angles = AngleSet { a: 37.44, b: 90.0, c: f64::NAN };
        assert_eq!(angles.label(Vertex::A), "A: 37.4");
        assert_eq!(angles.label(Vertex::B), "B: 90.0");
        assert_eq!(angles.label(Vertex::C), "C: NaN");
    }

    proptest! {
        #[test]
        fn angles_sum_to_one_eighty(
            ax in -1000.0f64..1000.0, ay in -1000.0f64..1000.0,
            bx in -1000.0f64..1000.0, by in -1000.0f64..1000.0,
            cx in -1000.0f64..1000.0, cy in -1000.0f64..1000.0,
        ) {
            let t = tri(ax, ay, bx, by, cx, cy);
            let (a, b, c) = t.side_lengths();
            let doubled_area = ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)).abs();
            // Skip slivers where acos loses all precision.
            prop_assume!(doubled_area > 1e-3 * a.max(b).max(c).powi(2));
            let angles = interior_angles(&t);
            prop_assert!((angles.sum() - 180.0).abs() < 1e-6, "sum = {}", angles.sum());
        }
    }
}
