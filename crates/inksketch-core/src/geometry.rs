//! Pure geometry helpers shared by hit-testing and lasso selection.

use kurbo::Point;

/// A circular hit-test region (eraser tip, grab tolerance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Check whether a point lies strictly inside the circle.
    ///
    /// Boundary points count as outside; a zero-radius circle contains
    /// nothing.
    pub fn contains(&self, point: Point) -> bool {
        let dx = self.center.x - point.x;
        let dy = self.center.y - point.y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

/// Even-odd point-in-polygon test.
///
/// The polygon is implicitly closed (the last vertex connects back to the
/// first). Polygons with fewer than three distinct vertices contain
/// nothing.
pub fn polygon_contains(polygon: &[Point], point: Point) -> bool {
    if distinct_vertices(polygon) < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pi.x + (point.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Count distinct vertices, stopping as soon as three are found.
fn distinct_vertices(polygon: &[Point]) -> usize {
    let mut distinct: Vec<Point> = Vec::with_capacity(3);
    for &p in polygon {
        if !distinct.contains(&p) {
            distinct.push(p);
            if distinct.len() == 3 {
                break;
            }
        }
    }
    distinct.len()
}
