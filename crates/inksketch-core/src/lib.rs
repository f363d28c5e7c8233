//! InkSketch Core Library
//!
//! The sketch document engine: vector stroke model, spatial queries for
//! erase and lasso selection, snapshot-based undo/redo history, and
//! persistence. Rendering front-ends drive this crate through plain
//! function calls and poll the current document to redraw.

pub mod document;
pub mod geometry;
pub mod history;
pub mod session;
pub mod storage;
pub mod stroke;

pub use document::SketchDocument;
pub use geometry::{Circle, polygon_contains};
pub use history::History;
pub use session::{DEFAULT_ERASE_RADIUS, SketchSession, Tool};
pub use storage::{FileStore, MemoryStore, Storage, StorageError};
pub use stroke::{Color, Path, PathId, Pen};
