//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::document::SketchDocument;
use std::collections::HashMap;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, SketchDocument>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn save(&mut self, name: &str, document: &SketchDocument) -> StorageResult<()> {
        self.documents.insert(name.to_string(), document.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> StorageResult<SketchDocument> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn delete(&mut self, name: &str) -> StorageResult<()> {
        self.documents.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.documents.contains_key(name))
    }
}
