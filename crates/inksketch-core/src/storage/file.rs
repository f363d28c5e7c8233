//! File-based storage: one JSON file per sketch.

use super::{Storage, StorageError, StorageResult};
use crate::document::SketchDocument;
use std::fs;
use std::path::PathBuf;

/// File-based storage under a base directory.
pub struct FileStore {
    /// Base directory for sketch files.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/inksketch/sketches/`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("inksketch").join("sketches"))
    }

    /// Get the file path for a sketch name.
    fn sketch_path(&self, name: &str) -> PathBuf {
        // Sanitize the name to be safe for filenames
        let safe: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", safe))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStore {
    fn save(&mut self, name: &str, document: &SketchDocument) -> StorageResult<()> {
        let path = self.sketch_path(name);
        let json = document
            .to_json()
            .map_err(|e| StorageError::Io(format!("Failed to serialize '{}': {}", name, e)))?;

        // Write to a temp file and rename, so a failed save never clobbers
        // the previous version.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| {
            StorageError::Io(format!("Failed to move {} into place: {}", tmp.display(), e))
        })?;

        log::info!("saved sketch '{}' to {}", name, path.display());
        Ok(())
    }

    fn load(&self, name: &str) -> StorageResult<SketchDocument> {
        let path = self.sketch_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let json = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        SketchDocument::from_json(&json).map_err(|e| {
            StorageError::CorruptDocument(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&mut self, name: &str) -> StorageResult<()> {
        let path = self.sketch_path(name);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&self.base_path)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.sketch_path(name).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::Pen;
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_document() -> SketchDocument {
        let mut doc = SketchDocument::new();
        doc.start_path(Point::new(1.0, 2.0), Pen::default());
        doc.continue_path(Point::new(3.0, 4.0));
        doc.finish_path(Point::new(5.0, 6.0));
        doc
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = sample_document();

        store.save("test-doc", &doc).unwrap();
        let loaded = store.load("test-doc").unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.paths[0].id(), doc.paths[0].id());
        assert_eq!(loaded.paths[0].points, doc.paths[0].points);
        assert_eq!(loaded.paths[0].pen, doc.paths[0].pen);
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(
            store.load("nonexistent"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_corrupt_payload_is_surfaced() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("bad.json"), "{ definitely not a sketch").unwrap();

        assert!(matches!(
            store.load("bad"),
            Err(StorageError::CorruptDocument(_))
        ));
    }

    #[test]
    fn test_save_overwrites_atomically() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).unwrap();

        store.save("doc", &sample_document()).unwrap();
        let mut bigger = sample_document();
        bigger.start_path(Point::new(9.0, 9.0), Pen::default());
        bigger.finish_path(Point::new(10.0, 10.0));
        store.save("doc", &bigger).unwrap();

        assert_eq!(store.load("doc").unwrap().len(), 2);
        // No stray temp file left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = SketchDocument::new();

        store.save("doc1", &doc).unwrap();
        store.save("doc2", &doc).unwrap();
        let list = store.list().unwrap();
        assert_eq!(list.len(), 2);

        store.delete("doc1").unwrap();
        assert!(!store.exists("doc1").unwrap());
        assert!(store.exists("doc2").unwrap());
    }

    #[test]
    fn test_sanitizes_name() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).unwrap();
        let doc = sample_document();

        store.save("my/sketch:v2", &doc).unwrap();
        let loaded = store.load("my/sketch:v2").unwrap();
        assert_eq!(loaded.paths[0].id(), doc.paths[0].id());
    }
}
