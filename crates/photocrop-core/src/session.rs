//! The editing session: one photo, one crop box, one set of output settings.
//!
//! `CropSession` is the single object the page drives. Every mutation goes
//! through [`CropState::apply`]; the session only adds the pieces the reducer
//! does not own (the decoded photo, the cached preview geometry and the
//! output settings).

use crate::color::{Color, ColorError};
use crate::crop::{CropBox, CropEvent, CropState, InteractionMode};
use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::encode::ExportFormat;
use crate::export::{export_photo, ExportError, ExportOptions, ExportedPhoto};
use crate::geometry::{CanvasSize, PlacedImage, PreviewGeometry};
use crate::render::{render_preview, PreviewFrame, RenderStyle};
use crate::standards::{default_standard, find_standard, PhotoStandard, StandardError};

/// Mouse cursor the page should show over the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Move,
    Resize,
}

impl Cursor {
    /// CSS `cursor` value.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::Resize => "nwse-resize",
        }
    }
}

impl From<InteractionMode> for Cursor {
    fn from(mode: InteractionMode) -> Self {
        match mode {
            InteractionMode::None => Cursor::Default,
            InteractionMode::Move => Cursor::Move,
            InteractionMode::Resize => Cursor::Resize,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CropSession {
    image: Option<DecodedImage>,
    /// Fit of `image` into the current canvas, recomputed on load and resize.
    geometry: Option<PreviewGeometry>,
    state: CropState,
    options: ExportOptions,
    style: RenderStyle,
}

impl CropSession {
    /// Start an empty session for a container of the given width.
    pub fn new(container_width: u32) -> Self {
        let canvas = CanvasSize::for_container(container_width);
        Self {
            image: None,
            geometry: None,
            state: CropState::new(canvas, default_standard().clone()),
            options: ExportOptions::default(),
            style: RenderStyle::default(),
        }
    }

    /// Decode a JPEG/PNG file and make it the session photo.
    ///
    /// On failure the previous photo and crop box are left untouched.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        let image = decode_image(bytes)?;
        self.set_image(image);
        Ok(())
    }

    /// Replace the session photo and reset the crop box around it.
    pub fn set_image(&mut self, image: DecodedImage) {
        let (width, height) = image.dimensions();
        self.geometry = Some(PreviewGeometry::new(self.canvas(), width, height));
        self.image = Some(image);
        self.dispatch(CropEvent::ImageLoaded { width, height });
    }

    /// Follow a change of the container width.
    pub fn resize_container(&mut self, container_width: u32) {
        let canvas = CanvasSize::for_container(container_width);
        if canvas == self.canvas() {
            return;
        }
        self.geometry = self
            .image
            .as_ref()
            .map(|img| PreviewGeometry::new(canvas, img.width, img.height));
        self.dispatch(CropEvent::CanvasResized(canvas));
    }

    /// Make the named catalog entry the active standard.
    pub fn select_standard(&mut self, name: &str) -> Result<(), StandardError> {
        let standard = find_standard(name)?.clone();
        self.dispatch(CropEvent::StandardSelected(standard));
        Ok(())
    }

    /// Set the crop width in preview pixels; the height follows the standard.
    pub fn set_crop_width(&mut self, width: f64) {
        self.dispatch(CropEvent::WidthSet(width));
    }

    /// Set the background from CSS hex text.
    pub fn set_background(&mut self, hex: &str) -> Result<(), ColorError> {
        self.options.background = Color::parse_hex(hex)?;
        Ok(())
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.options.format = format;
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.dispatch(CropEvent::PointerDown { x, y });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch(CropEvent::PointerMoved { x, y });
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(CropEvent::PointerReleased);
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(CropEvent::PointerLeft);
    }

    /// Paint the current preview frame.
    pub fn render(&self) -> PreviewFrame {
        render_preview(
            self.canvas(),
            self.placed(),
            &self.state.crop(),
            self.options.background,
            &self.style,
        )
    }

    /// Encode the crop at the active standard's pixel size.
    pub fn export(&self) -> Result<ExportedPhoto, ExportError> {
        export_photo(
            self.placed(),
            &self.state.crop(),
            self.state.standard(),
            &self.options,
        )
    }

    /// Cursor to show with the pointer at `(x, y)`.
    ///
    /// During a drag the active interaction decides; otherwise it is what a
    /// press at that position would start.
    pub fn cursor(&self, x: f64, y: f64) -> Cursor {
        let interaction = self.state.interaction();
        if interaction.is_active() {
            return interaction.mode.into();
        }
        if !self.state.has_image() {
            return Cursor::Default;
        }
        self.state.hit_test(x, y).into()
    }

    pub fn crop_box(&self) -> CropBox {
        self.state.crop()
    }

    pub fn standard(&self) -> &PhotoStandard {
        self.state.standard()
    }

    pub fn canvas(&self) -> CanvasSize {
        self.state.canvas()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn geometry(&self) -> Option<&PreviewGeometry> {
        self.geometry.as_ref()
    }

    pub fn background(&self) -> Color {
        self.options.background
    }

    pub fn format(&self) -> ExportFormat {
        self.options.format
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    fn placed(&self) -> Option<PlacedImage<'_>> {
        match (&self.image, &self.geometry) {
            (Some(image), Some(geometry)) => Some(PlacedImage { image, geometry }),
            _ => None,
        }
    }

    fn dispatch(&mut self, event: CropEvent) {
        self.state = self.state.clone().apply(event);
    }
}
