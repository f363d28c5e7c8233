//! PNG export of rasterized sketches.

use std::fs;
use std::path::Path;

use inksketch_core::document::SketchDocument;
use thiserror::Error;

use crate::raster::{Raster, rasterize};

/// Errors surfaced by the export pipeline.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document has no drawable content; nothing is written.
    #[error("Nothing to export: the document has no drawable content")]
    EmptyDocument,
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Encode a raster as a PNG byte stream (RGBA8).
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ExportError> {
    let mut data = Vec::new();
    let mut encoder = png::Encoder::new(&mut data, raster.image.width(), raster.image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    writer
        .write_image_data(raster.image.as_raw())
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(data)
}

/// Rasterize `document` and write it to `path` as a PNG.
///
/// All-or-nothing: the encoded bytes go to a temporary file that is
/// renamed over the target, so a failed export leaves any previous export
/// intact. An empty document is reported as `EmptyDocument` without
/// creating or overwriting a file.
pub fn export_png(document: &SketchDocument, path: &Path) -> Result<(), ExportError> {
    let raster = rasterize(document)?;
    let data = encode_png(&raster)?;

    let tmp = path.with_extension("png.tmp");
    fs::write(&tmp, &data)
        .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path).map_err(|e| {
        ExportError::Io(format!("Failed to move {} into place: {}", tmp.display(), e))
    })?;

    log::info!(
        "exported {}x{} PNG to {}",
        raster.image.width(),
        raster.image.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use inksketch_core::stroke::Pen;
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_document() -> SketchDocument {
        let mut doc = SketchDocument::new();
        doc.start_path(Point::new(0.0, 0.0), Pen::default());
        doc.continue_path(Point::new(20.0, 10.0));
        doc.continue_path(Point::new(40.0, 0.0));
        doc.finish_path(Point::new(60.0, 10.0));
        doc
    }

    #[test]
    fn test_export_writes_png() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("sketch.png");

        export_png(&sample_document(), &target).unwrap();

        let data = fs::read(&target).unwrap();
        assert_eq!(&data[..8], b"\x89PNG\r\n\x1a\n");
        // No stray temp file left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_empty_export_touches_nothing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("sketch.png");

        let result = export_png(&SketchDocument::new(), &target);
        assert!(matches!(result, Err(ExportError::EmptyDocument)));
        assert!(!target.exists());
    }

    #[test]
    fn test_empty_export_preserves_previous_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("sketch.png");
        export_png(&sample_document(), &target).unwrap();
        let before = fs::read(&target).unwrap();

        let result = export_png(&SketchDocument::new(), &target);
        assert!(matches!(result, Err(ExportError::EmptyDocument)));
        assert_eq!(fs::read(&target).unwrap(), before);
    }

    #[test]
    fn test_repeated_export_is_byte_identical() {
        let dir = tempdir().unwrap();
        let doc = sample_document();

        let first = dir.path().join("a.png");
        let second = dir.path().join("b.png");
        export_png(&doc, &first).unwrap();
        export_png(&doc, &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }
}
