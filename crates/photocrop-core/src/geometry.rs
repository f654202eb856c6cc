//! Coordinate mapping between image, preview and export space.
//!
//! Three pixel coordinate systems meet here:
//! - **Image space**: the decoded source image at full resolution
//! - **Preview space**: the on-screen canvas the image is letterboxed into
//! - **Export space**: the output raster sized from a physical standard
//!
//! Preview and image space differ by one uniform scale plus an offset, both
//! taken from a single [`Placement`]. The placement is computed once per
//! image load or canvas resize and stored in a [`PreviewGeometry`], which is
//! then handed to both the preview renderer and the exporter so the two can
//! never disagree about where the image sits.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - All rectangles are `(x, y, width, height)` in floating point pixels

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Millimeters per inch, used for DPI conversion.
pub const MM_PER_INCH: f64 = 25.4;

/// Preview canvas aspect ratio (width / height).
pub const PREVIEW_ASPECT: f64 = 4.0 / 3.0;

/// Convert a physical length to pixels at the given print resolution.
///
/// The result is not rounded; callers round only when allocating a raster
/// (see [`round_to_pixels`]).
pub fn physical_to_pixels(length_mm: f64, dpi: u32) -> f64 {
    (length_mm / MM_PER_INCH) * dpi as f64
}

/// Round a pixel length to a whole raster dimension.
///
/// Nearest integer, half away from zero, never less than 1.
pub fn round_to_pixels(length: f64) -> u32 {
    if !length.is_finite() {
        return 1;
    }
    length.round().max(1.0) as u32
}

/// An axis-aligned rectangle in floating point pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies strictly inside the rectangle.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px > self.x && px < self.right() && py > self.y && py < self.bottom()
    }

    /// Whether the rectangle lies fully inside `0..width` x `0..height`.
    pub fn fits_within(&self, canvas: CanvasSize) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= canvas.width as f64
            && self.bottom() <= canvas.height as f64
    }

    /// Translate the rectangle by the minimum distance that puts it inside
    /// the canvas. The size is never changed; a rectangle larger than the
    /// canvas is pinned to the top-left corner.
    pub fn translated_into(&self, canvas: CanvasSize) -> Rect {
        let max_x = canvas.width as f64 - self.width;
        let max_y = canvas.height as f64 - self.height;
        Rect {
            x: self.x.min(max_x).max(0.0),
            y: self.y.min(max_y).max(0.0),
            ..*self
        }
    }
}

/// Size of the preview canvas in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas for a container of the given width, at a fixed 4:3 ratio.
    ///
    /// The height is truncated to whole pixels the same way a DOM canvas
    /// truncates a fractional `height` assignment.
    pub fn for_container(container_width: u32) -> Self {
        let height = (container_width as f64 / PREVIEW_ASPECT) as u32;
        Self {
            width: container_width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where fitted content is drawn inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub draw_x: f64,
    pub draw_y: f64,
    pub draw_width: f64,
    pub draw_height: f64,
}

impl Placement {
    /// Preview pixels per source pixel for content of the given width.
    pub fn scale(&self, content_width: f64) -> f64 {
        if content_width <= 0.0 {
            return 0.0;
        }
        self.draw_width / content_width
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.draw_x, self.draw_y, self.draw_width, self.draw_height)
    }
}

/// Letterbox `content` inside `container`, preserving its aspect ratio.
///
/// The content fills whichever dimension is the binding constraint and is
/// centered along the other with equal margins. Degenerate sizes produce an
/// empty placement at the container center.
pub fn fit_rect(
    container_width: f64,
    container_height: f64,
    content_width: f64,
    content_height: f64,
) -> Placement {
    if container_width <= 0.0
        || container_height <= 0.0
        || content_width <= 0.0
        || content_height <= 0.0
    {
        return Placement {
            draw_x: container_width.max(0.0) / 2.0,
            draw_y: container_height.max(0.0) / 2.0,
            draw_width: 0.0,
            draw_height: 0.0,
        };
    }

    let container_aspect = container_width / container_height;
    let content_aspect = content_width / content_height;

    if content_aspect > container_aspect {
        // Wider than the container: fill the width, bars above and below
        let draw_height = container_width / content_aspect;
        Placement {
            draw_x: 0.0,
            draw_y: (container_height - draw_height) / 2.0,
            draw_width: container_width,
            draw_height,
        }
    } else {
        // Taller (or equal): fill the height, bars left and right
        let draw_width = container_height * content_aspect;
        Placement {
            draw_x: (container_width - draw_width) / 2.0,
            draw_y: 0.0,
            draw_width,
            draw_height: container_height,
        }
    }
}

/// Fit parameters shared by the preview renderer and the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewGeometry {
    pub canvas: CanvasSize,
    pub image_width: u32,
    pub image_height: u32,
    pub placement: Placement,
}

impl PreviewGeometry {
    /// Compute the placement of an image inside a canvas.
    pub fn new(canvas: CanvasSize, image_width: u32, image_height: u32) -> Self {
        let placement = fit_rect(
            canvas.width as f64,
            canvas.height as f64,
            image_width as f64,
            image_height as f64,
        );
        Self {
            canvas,
            image_width,
            image_height,
            placement,
        }
    }

    /// Preview pixels per source pixel.
    pub fn scale(&self) -> f64 {
        self.placement.scale(self.image_width as f64)
    }

    /// The full source image as a rectangle in image space.
    pub fn image_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.image_width as f64, self.image_height as f64)
    }
}

/// A source image together with the geometry it is displayed with.
#[derive(Debug, Clone, Copy)]
pub struct PlacedImage<'a> {
    pub image: &'a DecodedImage,
    pub geometry: &'a PreviewGeometry,
}

/// Map a rectangle from preview space into source-image space.
///
/// ```text
/// source_x = (rect.x - draw_x) / scale
/// source_w = rect.width / scale
/// ```
///
/// The result may extend past the image edges when the rectangle covers the
/// letterbox bars. Returns an empty rectangle when the geometry is degenerate.
pub fn preview_to_image(rect: &Rect, geometry: &PreviewGeometry) -> Rect {
    let scale = geometry.scale();
    if scale <= 0.0 || !scale.is_finite() {
        return Rect::default();
    }
    let p = &geometry.placement;
    Rect {
        x: (rect.x - p.draw_x) / scale,
        y: (rect.y - p.draw_y) / scale,
        width: rect.width / scale,
        height: rect.height / scale,
    }
}

/// Map a rectangle from source-image space into preview space.
///
/// Exact inverse of [`preview_to_image`] for the same geometry.
pub fn image_to_preview(rect: &Rect, geometry: &PreviewGeometry) -> Rect {
    let scale = geometry.scale();
    let p = &geometry.placement;
    Rect {
        x: rect.x * scale + p.draw_x,
        y: rect.y * scale + p.draw_y,
        width: rect.width * scale,
        height: rect.height * scale,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the fitted content stays inside the container and keeps its aspect ratio.
        #[test]
        fn prop_fit_inside_and_aspect_preserved(
            cw in 1.0f64..2000.0,
            ch in 1.0f64..2000.0,
            iw in 1.0f64..8000.0,
            ih in 1.0f64..8000.0,
        ) {
            let p = fit_rect(cw, ch, iw, ih);
            prop_assert!(p.draw_x >= -1e-9 && p.draw_y >= -1e-9);
            prop_assert!(p.draw_x + p.draw_width <= cw + 1e-6);
            prop_assert!(p.draw_y + p.draw_height <= ch + 1e-6);
            let content_aspect = iw / ih;
            let drawn_aspect = p.draw_width / p.draw_height;
            prop_assert!((content_aspect - drawn_aspect).abs() / content_aspect < 1e-9);
        }

        /// Property: one dimension is always filled and the other is centered.
        #[test]
        fn prop_fit_fills_and_centers(
            cw in 1.0f64..2000.0,
            ch in 1.0f64..2000.0,
            iw in 1.0f64..8000.0,
            ih in 1.0f64..8000.0,
        ) {
            let p = fit_rect(cw, ch, iw, ih);
            let fills_w = (p.draw_width - cw).abs() < 1e-6;
            let fills_h = (p.draw_height - ch).abs() < 1e-6;
            prop_assert!(fills_w || fills_h);
            let left = p.draw_x;
            let right = cw - p.draw_x - p.draw_width;
            let top = p.draw_y;
            let bottom = ch - p.draw_y - p.draw_height;
            prop_assert!((left - right).abs() < 1e-6);
            prop_assert!((top - bottom).abs() < 1e-6);
        }

        /// Property: preview -> image -> preview is the identity.
        #[test]
        fn prop_round_trip(
            container in 100u32..1600,
            iw in 1u32..6000,
            ih in 1u32..6000,
            x in 0.0f64..1000.0,
            y in 0.0f64..1000.0,
            w in 1.0f64..800.0,
            h in 1.0f64..800.0,
        ) {
            let geo = PreviewGeometry::new(CanvasSize::for_container(container), iw, ih);
            let rect = Rect::new(x, y, w, h);
            let back = image_to_preview(&preview_to_image(&rect, &geo), &geo);
            let tol = 1e-6 * (1.0 + x.max(y).max(w).max(h));
            prop_assert!((back.x - rect.x).abs() < tol);
            prop_assert!((back.y - rect.y).abs() < tol);
            prop_assert!((back.width - rect.width).abs() < tol);
            prop_assert!((back.height - rect.height).abs() < tol);
        }
    }
}
