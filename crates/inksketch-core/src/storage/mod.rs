//! Storage abstraction for sketch persistence.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::document::SketchDocument;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Sketch not found: {0}")]
    NotFound(String),
    #[error("Corrupt sketch document: {0}")]
    CorruptDocument(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for sketch storage backends.
///
/// The engine is single-threaded and synchronous; every operation runs to
/// completion before the next event is processed, so implementations need
/// no internal locking.
pub trait Storage {
    /// Save a document under `name`. All-or-nothing: a failed save must
    /// leave any previously stored document intact.
    fn save(&mut self, name: &str, document: &SketchDocument) -> StorageResult<()>;

    /// Load the document stored under `name`.
    ///
    /// A missing document is `NotFound`; an unreadable payload is
    /// `CorruptDocument`. Neither replaces the caller's in-memory
    /// document.
    fn load(&self, name: &str) -> StorageResult<SketchDocument>;

    /// Delete the document stored under `name`, if present.
    fn delete(&mut self, name: &str) -> StorageResult<()>;

    /// List all stored sketch names.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check whether a sketch exists under `name`.
    fn exists(&self, name: &str) -> StorageResult<bool>;
}
