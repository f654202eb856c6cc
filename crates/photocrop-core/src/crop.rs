//! Crop rectangle state and the pointer-interaction reducer.
//!
//! The crop box lives in preview-canvas pixels. It changes only through
//! [`CropState::apply`], a pure `(state, event) -> state` transition, which
//! keeps two invariants after every event:
//!
//! - **Aspect lock**: `height == width * height_mm / width_mm` for the active
//!   standard. Height is always derived, never set on its own.
//! - **Bounds**: the box lies fully inside the canvas.
//!
//! Moves clamp the position. Resizes that would leave the canvas are
//! rejected for that pointer frame and the previous size is kept.

use serde::{Deserialize, Serialize};

use crate::geometry::{CanvasSize, Rect};
use crate::standards::PhotoStandard;

/// The crop rectangle in preview-canvas pixels.
pub type CropBox = Rect;

/// Smallest width a resize drag can produce.
pub const MIN_CROP_WIDTH: f64 = 50.0;

/// Distance from the bottom-right corner that still grabs the resize handle.
pub const HANDLE_HIT_RADIUS: f64 = 10.0;

/// Default crop width as a fraction of `min(image width, canvas width)`.
pub const DEFAULT_WIDTH_FRACTION: f64 = 0.5;

/// Crop box used before any image has been loaded.
const INITIAL_CROP: CropBox = Rect::new(50.0, 50.0, 200.0, 200.0);

/// Which drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    None,
    Move,
    Resize,
}

/// Transient drag state captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interaction {
    pub mode: InteractionMode,
    /// Pointer position at pointer-down.
    pub anchor_x: f64,
    pub anchor_y: f64,
    /// Crop box at pointer-down.
    pub anchor_box: CropBox,
}

impl Interaction {
    pub fn is_active(&self) -> bool {
        self.mode != InteractionMode::None
    }
}

/// Everything that can change the crop box.
#[derive(Debug, Clone, PartialEq)]
pub enum CropEvent {
    /// A new source image was loaded; resets the box to the default size.
    ImageLoaded { width: u32, height: u32 },
    /// The preview canvas changed size.
    CanvasResized(CanvasSize),
    /// A different standard became active.
    StandardSelected(PhotoStandard),
    /// Width set directly (height follows).
    WidthSet(f64),
    PointerDown { x: f64, y: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerReleased,
    /// The pointer left the canvas.
    PointerLeft,
}

/// Crop box plus the context needed to keep its invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct CropState {
    canvas: CanvasSize,
    standard: PhotoStandard,
    image: Option<(u32, u32)>,
    crop: CropBox,
    interaction: Interaction,
}

impl CropState {
    /// Start with no image and the initial box fitted to the canvas.
    pub fn new(canvas: CanvasSize, standard: PhotoStandard) -> Self {
        let width = max_width(INITIAL_CROP.width, canvas, &standard);
        let crop = Rect {
            width,
            height: standard.height_for_width(width),
            ..INITIAL_CROP
        }
        .translated_into(canvas);

        Self {
            canvas,
            standard,
            image: None,
            crop,
            interaction: Interaction::default(),
        }
    }

    pub fn crop(&self) -> CropBox {
        self.crop
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn standard(&self) -> &PhotoStandard {
        &self.standard
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// What a pointer-down at this position would start.
    ///
    /// The resize handle wins over the body of the box.
    pub fn hit_test(&self, x: f64, y: f64) -> InteractionMode {
        let c = &self.crop;
        let near_corner = (x - c.right()).abs() < HANDLE_HIT_RADIUS
            && (y - c.bottom()).abs() < HANDLE_HIT_RADIUS;
        if near_corner {
            InteractionMode::Resize
        } else if c.contains(x, y) {
            InteractionMode::Move
        } else {
            InteractionMode::None
        }
    }

    /// Apply one event and return the next state.
    pub fn apply(self, event: CropEvent) -> Self {
        match event {
            CropEvent::ImageLoaded { width, height } => self.image_loaded(width, height),
            CropEvent::CanvasResized(canvas) => self.canvas_resized(canvas),
            CropEvent::StandardSelected(standard) => self.standard_selected(standard),
            CropEvent::WidthSet(width) => self.width_set(width),
            CropEvent::PointerDown { x, y } => self.pointer_down(x, y),
            CropEvent::PointerMoved { x, y } => self.pointer_moved(x, y),
            CropEvent::PointerReleased | CropEvent::PointerLeft => Self {
                interaction: Interaction::default(),
                ..self
            },
        }
    }

    fn image_loaded(self, width: u32, height: u32) -> Self {
        let canvas = self.canvas;
        let wanted = (width as f64).min(canvas.width as f64) * DEFAULT_WIDTH_FRACTION;
        let crop_width = max_width(wanted, canvas, &self.standard);
        let crop_height = self.standard.height_for_width(crop_width);

        Self {
            image: Some((width, height)),
            crop: Rect::new(
                (canvas.width as f64 - crop_width) / 2.0,
                (canvas.height as f64 - crop_height) / 2.0,
                crop_width,
                crop_height,
            )
            .translated_into(canvas),
            interaction: Interaction::default(),
            ..self
        }
    }

    fn canvas_resized(self, canvas: CanvasSize) -> Self {
        // Scale with the canvas so the box keeps covering the same content
        let factor = if self.canvas.width > 0 {
            canvas.width as f64 / self.canvas.width as f64
        } else {
            1.0
        };
        let width = max_width(self.crop.width * factor, canvas, &self.standard);
        let crop = Rect::new(
            self.crop.x * factor,
            self.crop.y * factor,
            width,
            self.standard.height_for_width(width),
        )
        .translated_into(canvas);

        Self {
            canvas,
            crop,
            interaction: Interaction::default(),
            ..self
        }
    }

    fn standard_selected(self, standard: PhotoStandard) -> Self {
        let width = max_width(self.crop.width, self.canvas, &standard);
        let crop = Rect {
            width,
            height: standard.height_for_width(width),
            ..self.crop
        }
        .translated_into(self.canvas);

        Self {
            standard,
            crop,
            ..self
        }
    }

    fn width_set(self, width: f64) -> Self {
        let width = width.max(MIN_CROP_WIDTH);
        let height = self.standard.height_for_width(width);
        if width > self.canvas.width as f64 || height > self.canvas.height as f64 {
            return self;
        }
        let crop = Rect {
            width,
            height,
            ..self.crop
        }
        .translated_into(self.canvas);
        Self { crop, ..self }
    }

    fn pointer_down(self, x: f64, y: f64) -> Self {
        if self.image.is_none() {
            return self;
        }
        let interaction = Interaction {
            mode: self.hit_test(x, y),
            anchor_x: x,
            anchor_y: y,
            anchor_box: self.crop,
        };
        Self {
            interaction,
            ..self
        }
    }

    fn pointer_moved(self, x: f64, y: f64) -> Self {
        if self.image.is_none() {
            return self;
        }
        let Interaction {
            mode,
            anchor_x,
            anchor_y,
            anchor_box,
        } = self.interaction;
        let dx = x - anchor_x;
        let dy = y - anchor_y;
        let canvas_w = self.canvas.width as f64;
        let canvas_h = self.canvas.height as f64;

        match mode {
            InteractionMode::None => self,
            InteractionMode::Move => {
                let crop = Rect {
                    x: (anchor_box.x + dx).min(canvas_w - self.crop.width).max(0.0),
                    y: (anchor_box.y + dy).min(canvas_h - self.crop.height).max(0.0),
                    ..self.crop
                };
                Self { crop, ..self }
            }
            InteractionMode::Resize => {
                let width = (anchor_box.width + dx).max(MIN_CROP_WIDTH);
                let height = self.standard.height_for_width(width);
                if self.crop.x + width > canvas_w || self.crop.y + height > canvas_h {
                    // Rejected frame: keep the last valid size
                    return self;
                }
                let crop = Rect {
                    width,
                    height,
                    ..self.crop
                };
                Self { crop, ..self }
            }
        }
    }
}

/// Largest width not above `wanted` whose derived height still fits the canvas.
fn max_width(wanted: f64, canvas: CanvasSize, standard: &PhotoStandard) -> f64 {
    wanted
        .min(canvas.width as f64)
        .min(standard.width_for_height(canvas.height as f64))
        .max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::find_standard;

    const EPS: f64 = 1e-9;

    fn us() -> PhotoStandard {
        find_standard("US Passport (2x2 in)").unwrap().clone()
    }

    fn uk() -> PhotoStandard {
        find_standard("UK Passport (35x45 mm)").unwrap().clone()
    }

    fn canada() -> PhotoStandard {
        find_standard("Canadian Passport (50x70 mm)").unwrap().clone()
    }

    fn loaded(standard: PhotoStandard) -> CropState {
        CropState::new(CanvasSize::new(800, 600), standard).apply(CropEvent::ImageLoaded {
            width: 1000,
            height: 800,
        })
    }

    fn assert_in_bounds(state: &CropState) {
        let c = state.crop();
        let canvas = state.canvas();
        assert!(c.x >= 0.0 && c.y >= 0.0, "negative origin: {:?}", c);
        assert!(c.right() <= canvas.width as f64 + EPS, "right edge out: {:?}", c);
        assert!(c.bottom() <= canvas.height as f64 + EPS, "bottom edge out: {:?}", c);
    }

    #[test]
    fn test_initial_box() {
        let state = CropState::new(CanvasSize::new(800, 600), us());
        assert_eq!(state.crop(), Rect::new(50.0, 50.0, 200.0, 200.0));
        assert!(!state.has_image());
    }

    #[test]
    fn test_initial_box_small_canvas() {
        let state = CropState::new(CanvasSize::new(120, 90), us());
        assert_eq!(state.crop().width, 90.0);
        assert_in_bounds(&state);
    }

    #[test]
    fn test_image_loaded_centers_default_box() {
        let state = loaded(uk());
        let c = state.crop();
        assert_eq!(c.width, 400.0);
        assert!((c.height - 514.2857142857143).abs() < EPS);
        assert_eq!(c.x, 200.0);
        assert!((c.y - (600.0 - c.height) / 2.0).abs() < EPS);
        assert!(state.has_image());
    }

    #[test]
    fn test_image_loaded_small_image() {
        // min(120, 800) * 0.5 = 60
        let state = CropState::new(CanvasSize::new(800, 600), us())
            .apply(CropEvent::ImageLoaded { width: 120, height: 90 });
        assert_eq!(state.crop().width, 60.0);
        assert_eq!(state.crop().height, 60.0);
    }

    #[test]
    fn test_image_loaded_tall_standard_fits_canvas() {
        // 400 wide at 5:7 is 560 tall, more than the 300px canvas allows
        let state = CropState::new(CanvasSize::new(800, 300), canada())
            .apply(CropEvent::ImageLoaded { width: 2000, height: 1000 });
        assert!((state.crop().height - 300.0).abs() < 1e-6);
        assert_in_bounds(&state);
    }

    #[test]
    fn test_standard_change_rederives_height() {
        let state = loaded(us()).apply(CropEvent::StandardSelected(uk()));
        let c = state.crop();
        assert_eq!(c.width, 400.0);
        assert!((c.height - 400.0 * 45.0 / 35.0).abs() < EPS);
        assert_in_bounds(&state);
    }

    #[test]
    fn test_standard_change_translates_into_bounds() {
        let mut state = loaded(us());
        // Drag the box to the bottom edge
        state = state
            .apply(CropEvent::PointerDown { x: 400.0, y: 300.0 })
            .apply(CropEvent::PointerMoved { x: 400.0, y: 900.0 })
            .apply(CropEvent::PointerReleased);
        assert!((state.crop().bottom() - 600.0).abs() < EPS);

        // Taller standard pushes the box up instead of shrinking it
        let state = state.apply(CropEvent::StandardSelected(uk()));
        assert_eq!(state.crop().width, 400.0);
        assert_in_bounds(&state);
    }

    #[test]
    fn test_width_set() {
        let state = loaded(uk()).apply(CropEvent::WidthSet(300.0));
        assert_eq!(state.crop().width, 300.0);
        assert!((state.crop().height - 300.0 * 45.0 / 35.0).abs() < EPS);

        let state = state.apply(CropEvent::WidthSet(10.0));
        assert_eq!(state.crop().width, MIN_CROP_WIDTH);
    }

    #[test]
    fn test_width_set_rejected_when_too_tall() {
        let before = loaded(uk());
        let after = before.clone().apply(CropEvent::WidthSet(700.0));
        assert_eq!(after.crop(), before.crop());
    }

    #[test]
    fn test_hit_test() {
        let state = loaded(us());
        let c = state.crop();
        assert_eq!(state.hit_test(c.right() - 2.0, c.bottom() + 3.0), InteractionMode::Resize);
        assert_eq!(state.hit_test(c.x + 20.0, c.y + 20.0), InteractionMode::Move);
        assert_eq!(state.hit_test(c.x - 20.0, c.y - 20.0), InteractionMode::None);
        // Exactly 10px away is outside the handle
        assert_eq!(state.hit_test(c.right() + 10.0, c.bottom()), InteractionMode::None);
    }

    #[test]
    fn test_pointer_ignored_without_image() {
        let state = CropState::new(CanvasSize::new(800, 600), us());
        let next = state.clone().apply(CropEvent::PointerDown { x: 100.0, y: 100.0 });
        assert!(!next.interaction().is_active());
        let next = next.apply(CropEvent::PointerMoved { x: 150.0, y: 150.0 });
        assert_eq!(next.crop(), state.crop());
    }

    #[test]
    fn test_move() {
        let state = loaded(us());
        let start = state.crop();
        let state = state
            .apply(CropEvent::PointerDown { x: 300.0, y: 250.0 })
            .apply(CropEvent::PointerMoved { x: 310.0, y: 240.0 });
        assert_eq!(state.interaction().mode, InteractionMode::Move);
        assert_eq!(state.crop().x, start.x + 10.0);
        assert_eq!(state.crop().y, start.y - 10.0);
        assert_eq!(state.crop().width, start.width);
    }

    #[test]
    fn test_move_is_relative_to_anchor() {
        let state = loaded(us());
        let start = state.crop();
        // Several moves in one drag accumulate from the anchor, not the last frame
        let state = state
            .apply(CropEvent::PointerDown { x: 300.0, y: 250.0 })
            .apply(CropEvent::PointerMoved { x: 320.0, y: 250.0 })
            .apply(CropEvent::PointerMoved { x: 330.0, y: 250.0 });
        assert_eq!(state.crop().x, start.x + 30.0);
    }

    #[test]
    fn test_move_clamped() {
        let state = loaded(us())
            .apply(CropEvent::PointerDown { x: 300.0, y: 250.0 })
            .apply(CropEvent::PointerMoved { x: -5000.0, y: 5000.0 });
        assert_eq!(state.crop().x, 0.0);
        assert!((state.crop().bottom() - 600.0).abs() < EPS);
    }

    #[test]
    fn test_resize() {
        let state = loaded(uk());
        let c = state.crop();
        let state = state
            .apply(CropEvent::PointerDown {
                x: c.right(),
                y: c.bottom(),
            })
            .apply(CropEvent::PointerMoved {
                x: c.right() - 100.0,
                y: c.bottom(),
            });
        assert_eq!(state.interaction().mode, InteractionMode::Resize);
        assert_eq!(state.crop().width, 300.0);
        assert!((state.crop().height - 300.0 * 45.0 / 35.0).abs() < EPS);
        assert_eq!(state.crop().x, c.x);
        assert_eq!(state.crop().y, c.y);
    }

    #[test]
    fn test_resize_minimum_width() {
        let state = loaded(us());
        let c = state.crop();
        let state = state
            .apply(CropEvent::PointerDown {
                x: c.right(),
                y: c.bottom(),
            })
            .apply(CropEvent::PointerMoved { x: 0.0, y: 0.0 });
        assert_eq!(state.crop().width, MIN_CROP_WIDTH);
    }

    #[test]
    fn test_resize_out_of_bounds_rejected() {
        let state = loaded(us());
        let c = state.crop();
        let state = state
            .apply(CropEvent::PointerDown {
                x: c.right(),
                y: c.bottom(),
            })
            .apply(CropEvent::PointerMoved {
                x: c.right() + 20.0,
                y: c.bottom(),
            });
        let valid = state.crop();
        assert_eq!(valid.width, 420.0);

        // Would reach 1000px wide: frame ignored
        let state = state.apply(CropEvent::PointerMoved {
            x: c.right() + 600.0,
            y: c.bottom(),
        });
        assert_eq!(state.crop(), valid);
    }

    #[test]
    fn test_release_and_leave_clear_interaction() {
        let down = loaded(us()).apply(CropEvent::PointerDown { x: 300.0, y: 250.0 });
        assert!(down.interaction().is_active());
        assert!(!down.clone().apply(CropEvent::PointerReleased).interaction().is_active());
        assert!(!down.apply(CropEvent::PointerLeft).interaction().is_active());
    }

    #[test]
    fn test_move_after_release_is_ignored() {
        let state = loaded(us())
            .apply(CropEvent::PointerDown { x: 300.0, y: 250.0 })
            .apply(CropEvent::PointerLeft);
        let before = state.crop();
        let state = state.apply(CropEvent::PointerMoved { x: 500.0, y: 500.0 });
        assert_eq!(state.crop(), before);
    }

    #[test]
    fn test_canvas_resize_scales_box() {
        let state = loaded(us());
        let c = state.crop();
        let state = state.apply(CropEvent::CanvasResized(CanvasSize::new(400, 300)));
        assert_eq!(state.crop().width, c.width / 2.0);
        assert_eq!(state.crop().x, c.x / 2.0);
        assert_in_bounds(&state);
    }
}
