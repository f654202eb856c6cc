//! Preview rendering for the crop editor.
//!
//! [`render_preview`] paints the full editor frame into an RGBA buffer that
//! the page copies onto its canvas. It is a pure function of its inputs:
//! the same image, crop box, background, geometry and style always produce
//! the same pixels.
//!
//! # Paint Order
//!
//! 1. Clear to transparent
//! 2. Fill with the background color
//! 3. Draw the whole image letterboxed into the canvas
//! 4. Darken everything with a translucent black overlay
//! 5. Clear the crop box, refill it with the background and redraw the
//!    image fragment underneath it at full brightness
//! 6. Stroke the crop border
//! 7. Paint the resize handle on the bottom-right corner
//! 8. Draw the dashed head-top and chin guide lines

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, Blend, Canvas};
use imageproc::rect::Rect as PixelRect;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::crop::CropBox;
use crate::geometry::{CanvasSize, PlacedImage, Rect};
use crate::raster::{blit_scaled, pixel_span};

/// Visual parameters of the preview decorations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderStyle {
    /// Opacity of the black overlay outside the crop box (0.0 to 1.0).
    pub overlay_alpha: f32,
    /// Crop border and handle color.
    pub accent: Color,
    /// Border stroke width in pixels, centered on the box edge.
    pub stroke_width: f64,
    /// Side length of the square resize handle.
    pub handle_size: f64,
    /// Guide line color.
    pub guide_color: Color,
    /// Guide line opacity (0.0 to 1.0).
    pub guide_alpha: f32,
    /// Guide positions as fractions of the crop height (head top, chin).
    pub guide_fractions: [f64; 2],
    /// Dash pattern for the guides: `[on, off]` in pixels.
    pub guide_dash: [u32; 2],
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            overlay_alpha: 0.5,
            accent: Color::ACCENT,
            stroke_width: 2.0,
            handle_size: 10.0,
            guide_color: Color::WHITE,
            guide_alpha: 0.7,
            guide_fractions: [0.2, 0.7],
            guide_dash: [5, 5],
        }
    }
}

/// One rendered editor frame, RGBA with the canvas dimensions.
pub type PreviewFrame = RgbaImage;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Paint one preview frame.
///
/// `source` is `None` until an image has been loaded. The geometry inside
/// `source` must be the one the crop box was positioned against.
pub fn render_preview(
    canvas: CanvasSize,
    source: Option<PlacedImage<'_>>,
    crop: &CropBox,
    background: Color,
    style: &RenderStyle,
) -> PreviewFrame {
    // A fresh buffer is already cleared to transparent
    let mut frame = RgbaImage::new(canvas.width, canvas.height);
    if canvas.is_empty() {
        return frame;
    }
    let full = Rect::new(0.0, 0.0, canvas.width as f64, canvas.height as f64);
    let bg = background.to_rgba(1.0);

    fill(&mut frame, &full, bg);
    if let Some(placed) = source {
        draw_image(&mut frame, placed, &full);
    }

    let mut blended = Blend(frame);
    fill(&mut blended, &full, Color::BLACK.to_rgba(style.overlay_alpha));
    let mut frame = blended.0;

    fill(&mut frame, crop, TRANSPARENT);
    fill(&mut frame, crop, bg);
    if let Some(placed) = source {
        draw_image(&mut frame, placed, crop);
    }

    stroke_rect(&mut frame, crop, style.stroke_width, style.accent.to_rgba(1.0));

    let half = style.handle_size / 2.0;
    let handle = Rect::new(
        crop.right() - half,
        crop.bottom() - half,
        style.handle_size,
        style.handle_size,
    );
    fill(&mut frame, &handle, style.accent.to_rgba(1.0));

    let mut blended = Blend(frame);
    let guide = style.guide_color.to_rgba(style.guide_alpha);
    for y in guide_rows(crop, style) {
        dashed_hline(&mut blended, crop.x, crop.right(), y, style.guide_dash, guide);
    }
    blended.0
}

/// Vertical positions of the guide lines for a crop box.
pub fn guide_rows(crop: &CropBox, style: &RenderStyle) -> [f64; 2] {
    style.guide_fractions.map(|f| crop.y + crop.height * f)
}

/// Draw the placed image, restricted to `clip`.
fn draw_image(frame: &mut RgbaImage, placed: PlacedImage<'_>, clip: &Rect) {
    let size = frame.dimensions();
    blit_scaled(
        placed.image,
        &placed.geometry.image_rect(),
        &placed.geometry.placement.as_rect(),
        clip,
        size,
        |x, y, [r, g, b]| frame.put_pixel(x, y, Rgba([r, g, b, 255])),
    );
}

/// Fill the pixels covered by `rect` (see [`pixel_span`]).
fn fill<C>(canvas: &mut C, rect: &Rect, color: C::Pixel)
where
    C: Canvas,
{
    let (w, h) = canvas.dimensions();
    let xs = pixel_span(rect.x, rect.width, w);
    let ys = pixel_span(rect.y, rect.height, h);
    if xs.is_empty() || ys.is_empty() {
        return;
    }
    let area = PixelRect::at(xs.start as i32, ys.start as i32)
        .of_size(xs.len() as u32, ys.len() as u32);
    draw_filled_rect_mut(canvas, area, color);
}

/// Outline `rect` with a stroke of `width` centered on its edges.
fn stroke_rect(frame: &mut RgbaImage, rect: &Rect, width: f64, color: Rgba<u8>) {
    if width <= 0.0 {
        return;
    }
    let half = width / 2.0;
    let (x0, y0) = (rect.x - half, rect.y - half);
    let outer_w = rect.width + width;
    let outer_h = rect.height + width;

    fill(frame, &Rect::new(x0, y0, outer_w, width), color);
    fill(frame, &Rect::new(x0, rect.bottom() - half, outer_w, width), color);
    fill(frame, &Rect::new(x0, y0, width, outer_h), color);
    fill(frame, &Rect::new(rect.right() - half, y0, width, outer_h), color);
}

/// One-pixel dashed horizontal line from `x_start` to `x_end` at row `y`.
fn dashed_hline(
    canvas: &mut Blend<RgbaImage>,
    x_start: f64,
    x_end: f64,
    y: f64,
    dash: [u32; 2],
    color: Rgba<u8>,
) {
    let [on, off] = dash;
    let period = on as f64 + off as f64;
    if on == 0 || period <= 0.0 {
        return;
    }
    let row = y.floor() as f32;
    let mut start = x_start;
    while start < x_end {
        let end = (start + on as f64).min(x_end);
        let (a, b) = (start.round(), end.round() - 1.0);
        if b >= a {
            draw_line_segment_mut(canvas, (a as f32, row), (b as f32, row), color);
        }
        start += period;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::DecodedImage;
    use crate::geometry::PreviewGeometry;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: identical inputs produce pixel-identical frames.
        #[test]
        fn prop_render_idempotent(
            (iw, ih) in (1u32..64, 1u32..64),
            seed in any::<u8>(),
            (x, y, w) in (0.0f64..60.0, 0.0f64..40.0, 5.0f64..40.0),
        ) {
            let pixels = (0..iw * ih * 3).map(|i| (i as u8).wrapping_mul(seed)).collect();
            let img = DecodedImage::new(iw, ih, pixels);
            let canvas = CanvasSize::new(120, 90);
            let geo = PreviewGeometry::new(canvas, iw, ih);
            let placed = PlacedImage { image: &img, geometry: &geo };
            let crop = Rect::new(x, y, w, w * 1.25);
            let style = RenderStyle::default();

            let a = render_preview(canvas, Some(placed), &crop, Color::WHITE, &style);
            let b = render_preview(canvas, Some(placed), &crop, Color::WHITE, &style);
            prop_assert_eq!(a, b);
        }
    }
}
