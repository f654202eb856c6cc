//! Crop session WASM bindings.
//!
//! `JsCropSession` wraps the core `CropSession` and adds the browser-only
//! pieces: painting onto a `<canvas>` and triggering a file download.
//!
//! # Example
//!
//! ```typescript
//! import { JsCropSession } from '@photocrop/wasm';
//!
//! const session = new JsCropSession(container.clientWidth);
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.render_to_canvas(canvas);
//!
//! canvas.onmousedown = (e) => { session.pointer_down(e.offsetX, e.offsetY); };
//! canvas.onmousemove = (e) => {
//!   session.pointer_move(e.offsetX, e.offsetY);
//!   canvas.style.cursor = session.cursor(e.offsetX, e.offsetY);
//!   session.render_to_canvas(canvas);
//! };
//! canvas.onmouseup = () => session.pointer_up();
//! canvas.onmouseleave = () => session.pointer_leave();
//!
//! downloadButton.onclick = () => session.download();
//! ```

use photocrop_core::{CropSession, ExportError, ExportFormat, ExportedPhoto, RenderStyle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement,
    ImageData, Url,
};

use crate::log::{log_error, log_info, log_warn};
use crate::types::JsExportedPhoto;

fn to_js<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// An interactive cropping session bound to one preview canvas.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session for a container of the given CSS pixel width.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: u32) -> JsCropSession {
        JsCropSession {
            inner: CropSession::new(container_width),
        }
    }

    /// Load a JPEG or PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error (and keeps the previous photo) if the bytes cannot be
    /// decoded.
    pub fn load_image(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        match self.inner.load_image(bytes) {
            Ok(()) => {
                if let Some(img) = self.inner.image() {
                    log_info(&format!("Loaded {}x{} photo", img.width, img.height));
                }
                Ok(())
            }
            Err(e) => {
                log_error(&format!("Failed to load photo: {}", e));
                Err(to_js(e))
            }
        }
    }

    /// Follow a change of the container width.
    pub fn resize_container(&mut self, container_width: u32) {
        self.inner.resize_container(container_width);
    }

    /// Activate a standard by its display name.
    pub fn select_standard(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.select_standard(name).map_err(to_js)
    }

    /// Set the crop width in preview pixels.
    pub fn set_crop_width(&mut self, width: f64) {
        self.inner.set_crop_width(width);
    }

    /// Set the background color from `#rrggbb` text.
    pub fn set_background(&mut self, hex: &str) -> Result<(), JsValue> {
        self.inner.set_background(hex).map_err(to_js)
    }

    /// Set the output format: `"jpeg"` or `"png"`.
    pub fn set_format(&mut self, format: &str) -> Result<(), JsValue> {
        let format: ExportFormat = format.parse().map_err(to_js)?;
        self.inner.set_format(format);
        Ok(())
    }

    /// Override preview decorations with a partial style object.
    ///
    /// Missing fields fall back to their defaults.
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        let style: RenderStyle = serde_wasm_bindgen::from_value(style)
            .map_err(|e| JsValue::from_str(&format!("Invalid render style: {}", e)))?;
        self.inner.set_style(style);
        Ok(())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// CSS cursor for the pointer at `(x, y)`.
    pub fn cursor(&self, x: f64, y: f64) -> String {
        self.inner.cursor(x, y).css_name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_width(&self) -> u32 {
        self.inner.canvas().width
    }

    #[wasm_bindgen(getter)]
    pub fn canvas_height(&self) -> u32 {
        self.inner.canvas().height
    }

    /// Current crop box as `{ x, y, width, height }` in preview pixels.
    pub fn crop_box(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.crop_box()).map_err(to_js)
    }

    /// Active standard as `{ name, widthMM, heightMM, dpi }`.
    pub fn standard(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.standard()).map_err(to_js)
    }

    /// Preview frame as RGBA bytes (`canvas_width * canvas_height * 4`).
    pub fn render_pixels(&self) -> Vec<u8> {
        self.inner.render().into_raw()
    }

    /// Paint the preview onto a canvas element.
    ///
    /// The canvas is resized to the session's canvas size first. Without a
    /// 2D context the paint is skipped and the problem is logged.
    pub fn render_to_canvas(&self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        let Some(context) = context else {
            log_error("Canvas 2D context unavailable, preview not drawn");
            return Ok(());
        };

        let size = self.inner.canvas();
        if canvas.width() != size.width {
            canvas.set_width(size.width);
        }
        if canvas.height() != size.height {
            canvas.set_height(size.height);
        }
        if size.is_empty() {
            return Ok(());
        }

        let frame = self.inner.render();
        let data = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(frame.as_raw().as_slice()),
            size.width,
            size.height,
        )?;
        context.put_image_data(&data, 0.0, 0.0)
    }

    /// Encode the crop at the active standard's size.
    ///
    /// # Errors
    ///
    /// Returns "Please upload an image first." when no photo is loaded.
    pub fn export_photo(&self) -> Result<JsExportedPhoto, JsValue> {
        self.export().map(JsExportedPhoto::from).map_err(to_js)
    }

    /// Export and save the photo through a temporary download link.
    ///
    /// Without a photo the user is alerted and nothing is downloaded.
    pub fn download(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        let photo = match self.export() {
            Ok(photo) => photo,
            Err(ExportError::NoImage) => {
                let message = ExportError::NoImage.to_string();
                window.alert_with_message(&message)?;
                return Err(JsValue::from_str(&message));
            }
            Err(e) => return Err(to_js(e)),
        };

        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(photo.bytes.as_slice()));
        let options = BlobPropertyBag::new();
        options.set_type(photo.mime_type());
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
        let url = Url::create_object_url_with_blob(&blob)?;

        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?;
        let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(&photo.file_name());
        anchor.click();
        Url::revoke_object_url(&url)?;

        log_info(&format!(
            "Saved {} ({}x{}, {} bytes)",
            photo.file_name(),
            photo.width,
            photo.height,
            photo.bytes.len()
        ));
        Ok(())
    }
}

impl JsCropSession {
    fn export(&self) -> Result<ExportedPhoto, ExportError> {
        self.inner.export().inspect_err(|e| match e {
            ExportError::NoImage => log_warn("Export requested with no photo loaded"),
            ExportError::Encode(err) => log_error(&format!("Export failed: {}", err)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![90u8; (width * height * 3) as usize];
        photocrop_core::encode::encode_png(&pixels, width, height).unwrap()
    }

    #[test]
    fn test_new_session_dimensions() {
        let session = JsCropSession::new(640);
        assert_eq!(session.canvas_width(), 640);
        assert_eq!(session.canvas_height(), 480);
        assert!(!session.has_image());
    }

    #[test]
    fn test_render_pixels_is_rgba_canvas() {
        let session = JsCropSession::new(200);
        assert_eq!(session.render_pixels().len(), 200 * 150 * 4);
    }

    #[test]
    fn test_load_and_drag() {
        let mut session = JsCropSession::new(800);
        assert!(session.load_image(&png(100, 80)).is_ok());
        assert!(session.has_image());

        let c = session.inner.crop_box();
        let (cx, cy) = (c.x + 10.0, c.y + 10.0);
        session.pointer_down(cx, cy);
        assert_eq!(session.cursor(cx, cy), "move");
        session.pointer_move(cx + 5.0, cy);
        session.pointer_up();
        assert!((session.inner.crop_box().x - (c.x + 5.0)).abs() < 1e-9);
        assert_eq!(session.cursor(0.0, 0.0), "default");
    }

    #[test]
    fn test_export_through_core() {
        let mut session = JsCropSession::new(800);
        assert!(matches!(session.export(), Err(ExportError::NoImage)));

        assert!(session.load_image(&png(100, 80)).is_ok());
        let photo = JsExportedPhoto::from(session.export().unwrap());
        assert_eq!((photo.width(), photo.height()), (602, 602));
        assert_eq!(photo.file_name(), "passport_photo.jpeg");
    }
}
