//! Label placement in render space.

use crate::geometry::{Point, Triangle};

/// Baseline anchor for a vertex letter, `offset` units above the marker.
pub fn vertex_label_anchor(vertex: Point, offset: f64) -> Point {
    Point::new(vertex.x, vertex.y - offset)
}

/// Baseline anchors for the angle labels, each `pull` of the way from the
/// centroid toward its own vertex. Labels stay inside the triangle for
/// `pull < 1` on all but very obtuse triangles.
pub fn angle_label_anchors(triangle: &Triangle, pull: f64) -> Triangle {
    let centroid = triangle.centroid();
    triangle.map(|vertex| centroid.lerp(vertex, pull))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vertex;

    #[test]
    fn letter_sits_above_marker() {
        assert_eq!(vertex_label_anchor(Point::new(40.0, 60.0), 15.0), Point::new(40.0, 45.0));
    }

    #[test]
    fn angle_labels_pulled_toward_vertices() {
        let triangle = Triangle::new(Point::new(0.0, 0.0), Point::new(300.0, 0.0), Point::new(0.0, 300.0));
        let anchors = angle_label_anchors(&triangle, 0.7);
        let centroid = triangle.centroid();
        for vertex in Vertex::ALL {
            let to_vertex = triangle[vertex].distance(centroid);
            let to_anchor = anchors[vertex].distance(centroid);
            assert!((to_anchor - 0.7 * to_vertex).abs() < 1e-9);
        }
        assert!((anchors.a.x - 30.0).abs() < 1e-9);
        assert!((anchors.a.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn zero_pull_collapses_to_centroid() {
        let triangle = Triangle::new(Point::new(0.0, 0.0), Point::new(6.0, 0.0), Point::new(0.0, 9.0));
        let anchors = angle_label_anchors(&triangle, 0.0);
        for p in anchors.points() {
            assert_eq!(p, Point::new(2.0, 3.0));
        }
    }
}
