//! CPU rasterization of a sketch document.

use image::{Rgba, RgbaImage};
use inksketch_core::document::SketchDocument;
use inksketch_core::stroke::Path;
use kurbo::Point;

use crate::export::ExportError;
use crate::smooth::smooth;

/// Margin around the content bounds, in canvas units.
const MARGIN: f64 = 20.0;
/// Pen widths above this get explicit round caps stamped at each vertex.
/// The on-screen line primitive rounds its caps natively; the export path
/// has to reproduce that rounding itself.
const CAP_WIDTH_THRESHOLD: f64 = 2.0;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A rasterized document: pixels plus the world-space origin of the crop.
#[derive(Debug, Clone)]
pub struct Raster {
    /// The rendered pixels, RGBA8 on a white background.
    pub image: RgbaImage,
    /// World coordinate of the image's top-left corner.
    pub origin: Point,
}

/// Rasterize a document onto a white canvas cropped to its content bounds
/// plus margin.
///
/// Deterministic: the output depends only on the document snapshot.
/// Documents without drawable content short-circuit with
/// `ExportError::EmptyDocument` instead of allocating a degenerate canvas.
pub fn rasterize(document: &SketchDocument) -> Result<Raster, ExportError> {
    let bounds = document.bounding_box().ok_or(ExportError::EmptyDocument)?;

    let max_pen_width = document
        .paths
        .iter()
        .map(|p| p.pen.width)
        .fold(0.0, f64::max);
    let pad = max_pen_width / 2.0 + MARGIN;
    let padded = bounds.inflate(pad, pad);

    let width = padded.width().ceil() as u32;
    let height = padded.height().ceil() as u32;
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyDocument);
    }

    let origin = Point::new(padded.x0, padded.y0);
    let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);

    for path in &document.paths {
        draw_path(&mut image, path, origin);
    }

    Ok(Raster { image, origin })
}

/// Draw one smoothed path in image coordinates.
fn draw_path(image: &mut RgbaImage, path: &Path, origin: Point) {
    if path.is_empty() {
        return;
    }
    let color = Rgba([path.pen.color.r, path.pen.color.g, path.pen.color.b, path.pen.color.a]);
    let half_width = path.pen.width / 2.0;

    let points: Vec<Point> = smooth(&path.points)
        .into_iter()
        .map(|p| Point::new(p.x - origin.x, p.y - origin.y))
        .collect();

    if points.len() == 1 {
        fill_disk(image, points[0], half_width.max(0.5), color);
        return;
    }

    for w in points.windows(2) {
        draw_segment(image, w[0], w[1], half_width, color);
    }

    if path.pen.width > CAP_WIDTH_THRESHOLD {
        for &p in &points {
            fill_disk(image, p, half_width, color);
        }
    }
}

/// Stroke one segment as a width-thick, butt-capped line: every pixel
/// whose center projects onto the segment within half the width.
fn draw_segment(image: &mut RgbaImage, a: Point, b: Point, half_width: f64, color: Rgba<u8>) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < f64::EPSILON {
        fill_disk(image, a, half_width.max(0.5), color);
        return;
    }

    let half = half_width.max(0.5);
    let (min_x, max_x) = pixel_span(a.x.min(b.x) - half, a.x.max(b.x) + half, image.width());
    let (min_y, max_y) = pixel_span(a.y.min(b.y) - half, a.y.max(b.y) + half, image.height());

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            let t = ((px - a.x) * dx + (py - a.y) * dy) / len_sq;
            if !(0.0..=1.0).contains(&t) {
                continue;
            }
            let cx = a.x + t * dx;
            let cy = a.y + t * dy;
            if (px - cx).powi(2) + (py - cy).powi(2) <= half * half {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Stamp a filled disk, used for round joins and caps.
fn fill_disk(image: &mut RgbaImage, center: Point, radius: f64, color: Rgba<u8>) {
    let (min_x, max_x) = pixel_span(center.x - radius, center.x + radius, image.width());
    let (min_y, max_y) = pixel_span(center.y - radius, center.y + radius, image.height());

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;
            if (px - center.x).powi(2) + (py - center.y).powi(2) <= radius * radius {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// Clamp a coordinate interval to valid pixel indices.
fn pixel_span(lo: f64, hi: f64, extent: u32) -> (u32, u32) {
    let last = extent.saturating_sub(1) as f64;
    let lo = lo.floor().clamp(0.0, last) as u32;
    let hi = hi.ceil().clamp(0.0, last) as u32;
    (lo, hi)
}
