//! Pen and path primitives for freehand strokes.

use crate::geometry::{Circle, polygon_contains};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable stroke color (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// Stroke style: width, color, optional dash pattern.
///
/// Pens are value types. Cloning a path clones its pen, so strokes never
/// share a mutable pen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// Stroke width in canvas units. Always positive.
    pub width: f64,
    /// Stroke color.
    pub color: Color,
    /// Dash pattern as (on, off) segment lengths. `None` draws solid.
    pub dash: Option<(f64, f64)>,
}

impl Pen {
    /// Create a solid pen.
    pub fn new(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: None,
        }
    }

    /// The dashed pen used for the transient lasso loop.
    pub fn lasso() -> Self {
        Self {
            width: 1.0,
            color: Color::black(),
            dash: Some((4.0, 4.0)),
        }
    }
}

impl Default for Pen {
    fn default() -> Self {
        Self::new(2.0, Color::black())
    }
}

/// Unique identifier for paths.
pub type PathId = Uuid;

/// One continuous stroke: a pen plus an ordered list of points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: PathId,
    /// Style the stroke was drawn with.
    pub pen: Pen,
    /// Points in drawing order.
    pub points: Vec<Point>,
    /// Uncommitted move displacement, used for preview only. Folded into
    /// `points` when the move commits; never persisted or rasterized.
    #[serde(skip)]
    pub pending_offset: Vec2,
}

impl Path {
    /// Create a new empty path.
    pub fn new(pen: Pen) -> Self {
        Self {
            id: Uuid::new_v4(),
            pen,
            points: Vec::new(),
            pending_offset: Vec2::ZERO,
        }
    }

    /// Create from existing points.
    pub fn from_points(pen: Pen, points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pen,
            points,
            pending_offset: Vec2::ZERO,
        }
    }

    /// Get the unique identifier.
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Add a point to the path. Rapid pointer sampling may append nearly
    /// coincident points; they are tolerated.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shift every point by `offset`. Only called when a move commits;
    /// previews go through `pending_offset` instead.
    pub fn translate(&mut self, offset: Vec2) {
        for point in &mut self.points {
            *point += offset;
        }
    }

    /// True if any point lies inside the circle. Used for erase
    /// hit-testing and for grabbing a selected path.
    pub fn overlaps(&self, circle: &Circle) -> bool {
        self.points.iter().any(|&p| circle.contains(p))
    }

    /// Treat the path's own points as a closed polygon and test `point`
    /// against it. Used when the path is a lasso loop.
    pub fn contains_point(&self, point: Point) -> bool {
        polygon_contains(&self.points, point)
    }

    /// Axis-aligned bounds of the raw points, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        let mut rect = Rect::new(first.x, first.y, first.x, first.y);
        for &p in &self.points[1..] {
            rect = rect.union_pt(p);
        }
        Some(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_points_in_order() {
        let mut path = Path::new(Pen::default());
        path.add_point(Point::new(0.0, 0.0));
        path.add_point(Point::new(10.0, 10.0));
        path.add_point(Point::new(10.0, 10.0));

        assert_eq!(path.len(), 3);
        assert_eq!(path.points[1], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_translate() {
        let mut path = Path::from_points(
            Pen::default(),
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
        );
        path.translate(Vec2::new(10.0, -2.0));

        assert_eq!(path.points[0], Point::new(11.0, 0.0));
        assert_eq!(path.points[1], Point::new(13.0, 2.0));
    }

    #[test]
    fn test_overlaps() {
        let path = Path::from_points(
            Pen::default(),
            vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)],
        );

        assert!(path.overlaps(&Circle::new(Point::new(99.0, 1.0), 5.0)));
        assert!(!path.overlaps(&Circle::new(Point::new(50.0, 0.0), 5.0)));
    }

    #[test]
    fn test_contains_point_as_closed_polygon() {
        let loop_path = Path::from_points(
            Pen::lasso(),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ],
        );

        assert!(loop_path.contains_point(Point::new(5.0, 5.0)));
        assert!(!loop_path.contains_point(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_bounds() {
        let path = Path::from_points(
            Pen::default(),
            vec![
                Point::new(10.0, 20.0),
                Point::new(-5.0, 8.0),
                Point::new(3.0, 40.0),
            ],
        );

        let bounds = path.bounds().unwrap();
        assert_eq!(bounds, Rect::new(-5.0, 8.0, 10.0, 40.0));
        assert!(Path::new(Pen::default()).bounds().is_none());
    }

    #[test]
    fn test_cloned_path_does_not_share_pen() {
        let path = Path::new(Pen::default());
        let mut copy = path.clone();
        copy.pen.width = 8.0;

        assert_eq!(path.pen.width, 2.0);
        assert_eq!(copy.id(), path.id());
    }
}
