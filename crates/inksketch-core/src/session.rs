//! Interaction session: maps pointer events onto document operations.
//!
//! The front-end owns one `SketchSession`, forwards pointer events to it
//! and polls `document()` after each call to redraw. The session enforces
//! the gesture state machine and takes exactly one history snapshot per
//! discrete gesture.

use crate::document::SketchDocument;
use crate::geometry::Circle;
use crate::history::History;
use crate::stroke::Pen;
use kurbo::Point;

/// Default eraser hit radius in canvas units.
pub const DEFAULT_ERASE_RADIUS: f64 = 7.0;
/// Hit radius for grabbing a selected path to move it.
const GRAB_RADIUS: f64 = 5.0;

/// Active interaction tool. Lasso doubles as the move tool: a press on a
/// selected path starts a move, a press elsewhere starts a new lasso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Draw,
    Erase,
    Lasso,
}

/// Per-gesture state, reset on pointer-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    #[default]
    Idle,
    Drawing,
    Erasing {
        snapshotted: bool,
    },
    Lassoing,
    Moving,
}

/// A sketching session: the history-wrapped document plus the interaction
/// state the front-end drives through pointer events.
#[derive(Debug, Clone)]
pub struct SketchSession {
    history: History,
    tool: Tool,
    pen: Pen,
    erase_radius: f64,
    gesture: Gesture,
}

impl Default for SketchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchSession {
    /// Create a session over an empty document.
    pub fn new() -> Self {
        Self::with_document(SketchDocument::new())
    }

    /// Create a session over an existing document (e.g. one loaded from
    /// storage). The document becomes the sole initial history snapshot.
    pub fn with_document(document: SketchDocument) -> Self {
        Self {
            history: History::new(document),
            tool: Tool::default(),
            pen: Pen::default(),
            erase_radius: DEFAULT_ERASE_RADIUS,
            gesture: Gesture::Idle,
        }
    }

    /// The current document, for redrawing and export.
    pub fn document(&self) -> &SketchDocument {
        self.history.current()
    }

    /// The undo/redo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Abandons any gesture in flight.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    /// The pen used for new strokes.
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// Set the pen used for new strokes.
    pub fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    /// The eraser hit radius.
    pub fn erase_radius(&self) -> f64 {
        self.erase_radius
    }

    /// Set the eraser hit radius.
    pub fn set_erase_radius(&mut self, radius: f64) {
        self.erase_radius = radius;
    }

    /// Pointer pressed at `point`: begin the gesture for the active tool.
    pub fn pointer_down(&mut self, point: Point) {
        match self.tool {
            Tool::Draw => {
                self.history.begin_action();
                let pen = self.pen.clone();
                self.history.current_mut().start_path(point, pen);
                self.gesture = Gesture::Drawing;
            }
            Tool::Erase => {
                self.history.current_mut().clear_selection();
                self.gesture = Gesture::Erasing { snapshotted: false };
                self.erase_sample(point);
            }
            Tool::Lasso => {
                let grab = Circle::new(point, GRAB_RADIUS);
                let doc = self.history.current();
                if !doc.selection().is_empty() && doc.selection_hit(&grab) {
                    self.history.begin_action();
                    self.history.current_mut().begin_transform(point);
                    self.gesture = Gesture::Moving;
                } else {
                    let doc = self.history.current_mut();
                    doc.clear_selection();
                    doc.start_lasso(point);
                    self.gesture = Gesture::Lassoing;
                }
            }
        }
    }

    /// Pointer moved to `point` while pressed.
    pub fn pointer_move(&mut self, point: Point) {
        match self.gesture {
            Gesture::Drawing => self.history.current_mut().continue_path(point),
            Gesture::Erasing { .. } => self.erase_sample(point),
            Gesture::Lassoing => self.history.current_mut().continue_lasso(point),
            Gesture::Moving => self.history.current_mut().update_transform(point),
            Gesture::Idle => {}
        }
    }

    /// Pointer released at `point`: complete the gesture.
    pub fn pointer_up(&mut self, point: Point) {
        match self.gesture {
            Gesture::Drawing => self.history.current_mut().finish_path(point),
            Gesture::Erasing { .. } => self.erase_sample(point),
            Gesture::Lassoing => {
                self.history.current_mut().finish_lasso(point);
            }
            Gesture::Moving => {
                let doc = self.history.current_mut();
                doc.update_transform(point);
                doc.commit_transform();
            }
            Gesture::Idle => {}
        }
        self.gesture = Gesture::Idle;
    }

    /// Step back one action. A no-op at the oldest state.
    pub fn undo(&mut self) -> bool {
        self.gesture = Gesture::Idle;
        self.history.undo()
    }

    /// Step forward one action. A no-op at the newest state.
    pub fn redo(&mut self) -> bool {
        self.gesture = Gesture::Idle;
        self.history.redo()
    }

    /// One eraser sample. Gestures that never remove a path leave history
    /// untouched; the snapshot is taken lazily before the first removal.
    fn erase_sample(&mut self, point: Point) {
        if self
            .history
            .current()
            .paths_at(point, self.erase_radius)
            .is_empty()
        {
            return;
        }
        if let Gesture::Erasing { snapshotted } = &mut self.gesture {
            if !*snapshotted {
                self.history.begin_action();
                *snapshotted = true;
            }
        }
        let radius = self.erase_radius;
        self.history.current_mut().erase_at(point, radius);
    }
}
