//! InkSketch raster export pipeline.
//!
//! Converts a sketch document into a cropped raster image: arc-length
//! smoothing of raw pointer input, stroke rasterization with round caps,
//! and PNG encoding. Rasterization is a pure function of the document
//! snapshot, so re-exporting an unchanged document is byte-identical.

pub mod export;
pub mod raster;
pub mod smooth;

pub use export::{ExportError, encode_png, export_png};
pub use raster::{Raster, rasterize};
pub use smooth::smooth;
