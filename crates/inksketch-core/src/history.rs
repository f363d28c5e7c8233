//! Snapshot-based undo/redo history.

use crate::document::SketchDocument;

/// Maximum number of snapshots to keep.
const MAX_HISTORY: usize = 50;

/// Linear undo/redo history of document snapshots.
///
/// `snapshots[cursor]` is the authoritative current document. Snapshots
/// beyond the cursor exist only to serve redo and are discarded the moment
/// a new action begins after an undo.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<SketchDocument>,
    cursor: usize,
}

impl History {
    /// Wrap `initial` as the sole starting snapshot.
    pub fn new(initial: SketchDocument) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    /// Open a new undo step: drop the redo branch, deep-clone the current
    /// snapshot and make the clone current.
    ///
    /// Must be called exactly once per discrete user gesture, before its
    /// first mutation.
    pub fn begin_action(&mut self) {
        self.snapshots.truncate(self.cursor + 1);
        let snapshot = self.snapshots[self.cursor].clone();
        self.snapshots.push(snapshot);
        self.cursor += 1;

        if self.snapshots.len() > MAX_HISTORY {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot. A no-op at the oldest snapshot, never an
    /// error.
    pub fn undo(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. A no-op at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 < self.snapshots.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The authoritative current document.
    pub fn current(&self) -> &SketchDocument {
        &self.snapshots[self.cursor]
    }

    /// Mutable access to the current document for in-place gesture
    /// mutations.
    pub fn current_mut(&mut self) -> &mut SketchDocument {
        &mut self.snapshots[self.cursor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Pen;
    use kurbo::Point;

    fn one_stroke_action(history: &mut History, x: f64) {
        history.begin_action();
        let doc = history.current_mut();
        doc.start_path(Point::new(x, 0.0), Pen::default());
        doc.finish_path(Point::new(x, 10.0));
    }

    #[test]
    fn test_undo_redo_restores_exact_state() {
        let mut history = History::new(SketchDocument::new());
        one_stroke_action(&mut history, 1.0);

        let after = history.current().clone();
        assert!(history.undo());
        assert!(history.current().is_empty());
        assert!(history.redo());

        assert_eq!(history.current().len(), 1);
        assert_eq!(
            history.current().paths[0].points,
            after.paths[0].points
        );
        assert_eq!(history.current().paths[0].id(), after.paths[0].id());
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new(SketchDocument::new());
        assert!(!history.undo());
        assert!(!history.redo());

        one_stroke_action(&mut history, 1.0);
        assert!(!history.redo());
        assert!(history.undo());
        assert!(!history.undo());
    }

    #[test]
    fn test_new_action_discards_redo_branch() {
        let mut history = History::new(SketchDocument::new());
        one_stroke_action(&mut history, 1.0);
        one_stroke_action(&mut history, 2.0);

        assert!(history.undo());
        assert!(history.can_redo());

        one_stroke_action(&mut history, 3.0);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.current().len(), 2);
    }

    #[test]
    fn test_mutation_does_not_leak_into_prior_snapshot() {
        let mut history = History::new(SketchDocument::new());
        one_stroke_action(&mut history, 1.0);
        one_stroke_action(&mut history, 2.0);

        history.undo();
        assert_eq!(history.current().len(), 1);
        assert_eq!(history.current().paths[0].points[0].x, 1.0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = History::new(SketchDocument::new());
        for i in 0..(MAX_HISTORY * 2) {
            one_stroke_action(&mut history, i as f64);
        }

        let mut undos = 0;
        while history.undo() {
            undos += 1;
        }
        assert_eq!(undos, MAX_HISTORY - 1);
        // The oldest surviving snapshot is no longer the empty document.
        assert!(!history.current().is_empty());
    }
}
