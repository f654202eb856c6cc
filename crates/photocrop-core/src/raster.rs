//! Pixel-grid helpers shared by the preview renderer and the exporter.
//!
//! # Pixel coverage
//!
//! A floating point rectangle covers the pixel columns
//! `round(x) .. round(x + width)`, clipped to the surface, and likewise for
//! rows. Every fill, clear and blit goes through [`pixel_span`] so the same
//! rectangle always touches the same pixels.
//!
//! # Resampling
//!
//! [`blit_scaled`] uses inverse mapping: for each destination pixel center
//! it computes the matching point in the source rectangle and samples the
//! source there with bilinear interpolation. Points that land outside the
//! source image are skipped, leaving whatever the destination already held.

use std::ops::Range;

use crate::decode::DecodedImage;
use crate::geometry::Rect;

/// Pixel indices covered by `start .. start + length` on an axis of `limit` pixels.
pub fn pixel_span(start: f64, length: f64, limit: u32) -> Range<u32> {
    let limit = limit as f64;
    let lo = start.round().max(0.0).min(limit) as u32;
    let hi = (start + length).round().max(0.0).min(limit) as u32;
    lo..hi.max(lo)
}

fn intersect(a: Range<u32>, b: Range<u32>) -> Range<u32> {
    let start = a.start.max(b.start);
    let end = a.end.min(b.end).max(start);
    start..end
}

/// Draw the `src` region of `source` stretched over `dst`, limited to `clip`.
///
/// `surface` is the `(width, height)` of the destination; `put` receives each
/// written pixel. One pass, no intermediate buffers. An empty `src` or `dst`
/// writes nothing.
pub fn blit_scaled<F>(
    source: &DecodedImage,
    src: &Rect,
    dst: &Rect,
    clip: &Rect,
    surface: (u32, u32),
    mut put: F,
) where
    F: FnMut(u32, u32, [u8; 3]),
{
    if dst.width <= 0.0 || dst.height <= 0.0 || src.width <= 0.0 || src.height <= 0.0 {
        return;
    }
    if source.is_empty() {
        return;
    }

    let xs = intersect(
        pixel_span(dst.x, dst.width, surface.0),
        pixel_span(clip.x, clip.width, surface.0),
    );
    let ys = intersect(
        pixel_span(dst.y, dst.height, surface.1),
        pixel_span(clip.y, clip.height, surface.1),
    );

    let step_x = src.width / dst.width;
    let step_y = src.height / dst.height;

    for py in ys {
        let sy = src.y + (py as f64 + 0.5 - dst.y) * step_y;
        for px in xs.clone() {
            let sx = src.x + (px as f64 + 0.5 - dst.x) * step_x;
            if let Some(rgb) = sample_bilinear(source, sx, sy) {
                put(px, py, rgb);
            }
        }
    }
}

/// Sample the image at a continuous position (pixel centers at `i + 0.5`).
///
/// Returns `None` outside `0..width` x `0..height`.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 3]> {
    let (w, h) = (image.width as f64, image.height as f64);
    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return None;
    }

    let fx = (x - 0.5).clamp(0.0, w - 1.0);
    let fy = (y - 0.5).clamp(0.0, h - 1.0);
    let x0 = fx.floor() as u32;
    let y0 = fy.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let tx = fx - x0 as f64;
    let ty = fy - y0 as f64;

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f64 * (1.0 - tx) + p10[c] as f64 * tx;
        let bottom = p01[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}
