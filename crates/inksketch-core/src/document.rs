//! The sketch document: ordered strokes plus the transient lasso workflow.

use crate::geometry::Circle;
use crate::stroke::{Path, PathId, Pen};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A sketch document containing all strokes.
///
/// The lasso, the selection and the gesture bookkeeping are UI-transient
/// and skipped during serialization; persisted snapshots contain `paths`
/// only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SketchDocument {
    /// All strokes, in drawing order.
    pub paths: Vec<Path>,
    /// The lasso loop being drawn, if any. Never enters `paths`.
    #[serde(skip)]
    lasso: Option<Path>,
    /// Ids of the currently selected paths.
    #[serde(skip)]
    selection: HashSet<PathId>,
    /// Whether a draw gesture is open (points may still be appended).
    #[serde(skip)]
    drawing: bool,
    /// Origin of the in-progress move, if any.
    #[serde(skip)]
    move_origin: Option<Point>,
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new stroke at `point`. Clears any active selection.
    pub fn start_path(&mut self, point: Point, pen: Pen) {
        self.clear_selection();
        let mut path = Path::new(pen);
        path.add_point(point);
        self.paths.push(path);
        self.drawing = true;
    }

    /// Append `point` to the stroke being drawn. Without an open draw
    /// gesture this is a local no-op.
    pub fn continue_path(&mut self, point: Point) {
        if !self.drawing {
            log::debug!("continue_path without an open stroke");
            return;
        }
        if let Some(path) = self.paths.last_mut() {
            path.add_point(point);
        }
    }

    /// Append the final point and close the draw gesture. No further
    /// points are accepted until the next `start_path`.
    pub fn finish_path(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if let Some(path) = self.paths.last_mut() {
            path.add_point(point);
        }
        self.drawing = false;
    }

    /// Ids of every path with a point inside the circle, in drawing order.
    pub fn paths_at(&self, point: Point, radius: f64) -> Vec<PathId> {
        let circle = Circle::new(point, radius);
        self.paths
            .iter()
            .filter(|p| p.overlaps(&circle))
            .map(|p| p.id())
            .collect()
    }

    /// Remove every path with a point inside the eraser circle.
    ///
    /// `radius` is the hit tolerance, independent of pen width. Returns
    /// the removed ids so callers can drop cached render artifacts.
    pub fn erase_at(&mut self, point: Point, radius: f64) -> Vec<PathId> {
        let removed = self.paths_at(point, radius);
        if !removed.is_empty() {
            self.paths.retain(|p| !removed.contains(&p.id()));
            for id in &removed {
                self.selection.remove(id);
            }
            log::debug!("erased {} path(s)", removed.len());
        }
        removed
    }

    /// Begin a lasso loop at `point`. The lasso is rendered dashed and
    /// never becomes part of the document.
    pub fn start_lasso(&mut self, point: Point) {
        let mut lasso = Path::new(Pen::lasso());
        lasso.add_point(point);
        self.lasso = Some(lasso);
    }

    /// Extend the lasso loop. Without an open lasso this is a no-op.
    pub fn continue_lasso(&mut self, point: Point) {
        if let Some(lasso) = self.lasso.as_mut() {
            lasso.add_point(point);
        }
    }

    /// Close the lasso loop and select every path with at least one point
    /// inside it; partial overlap suffices. The lasso is discarded and the
    /// new selection returned. A degenerate loop selects nothing.
    pub fn finish_lasso(&mut self, point: Point) -> HashSet<PathId> {
        let Some(mut lasso) = self.lasso.take() else {
            return HashSet::new();
        };
        lasso.add_point(point);
        if let Some(&first) = lasso.points.first() {
            lasso.add_point(first);
        }

        self.selection = self
            .paths
            .iter()
            .filter(|path| path.points.iter().any(|&p| lasso.contains_point(p)))
            .map(|path| path.id())
            .collect();
        log::debug!("lasso selected {} path(s)", self.selection.len());
        self.selection.clone()
    }

    /// True if any selected path has a point inside the circle. This is
    /// the grab test for starting a move.
    pub fn selection_hit(&self, circle: &Circle) -> bool {
        self.paths
            .iter()
            .any(|p| self.selection.contains(&p.id()) && p.overlaps(circle))
    }

    /// Begin moving the selection from `point`. Without a selection this
    /// is a no-op.
    pub fn begin_transform(&mut self, point: Point) {
        if self.selection.is_empty() {
            return;
        }
        self.move_origin = Some(point);
    }

    /// Update the move preview: every selected path gets the shared
    /// displacement (destination minus origin) as its pending offset.
    /// Real coordinates are untouched.
    pub fn update_transform(&mut self, point: Point) {
        let Some(origin) = self.move_origin else {
            return;
        };
        let offset = point - origin;
        let selection = &self.selection;
        for path in self.paths.iter_mut() {
            if selection.contains(&path.id()) {
                path.pending_offset = offset;
            }
        }
    }

    /// Fold every selected path's pending offset into its points and end
    /// the move. The only place real coordinates change for a move.
    pub fn commit_transform(&mut self) {
        let selection = &self.selection;
        for path in self.paths.iter_mut() {
            if selection.contains(&path.id()) && path.pending_offset != Vec2::ZERO {
                let offset = path.pending_offset;
                path.translate(offset);
                path.pending_offset = Vec2::ZERO;
            }
        }
        self.move_origin = None;
    }

    /// The lasso loop being drawn, if any.
    pub fn lasso(&self) -> Option<&Path> {
        self.lasso.as_ref()
    }

    /// Ids of the currently selected paths.
    pub fn selection(&self) -> &HashSet<PathId> {
        &self.selection
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Get a path by id.
    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|p| p.id() == id)
    }

    /// Check if the document has no strokes.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Remove all strokes and the selection.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.selection.clear();
    }

    /// Bounds over every point of every path, `None` for a document
    /// without points. Callers must check before dividing by the extent.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for path in &self.paths {
            if let Some(bounds) = path.bounds() {
                result = Some(match result {
                    Some(r) => r.union(bounds),
                    None => bounds,
                });
            }
        }
        result
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
