//! WASM-compatible wrapper types for export results.

use photocrop_core::ExportedPhoto;
use wasm_bindgen::prelude::*;

/// An encoded photo handed to JavaScript.
///
/// `bytes()` copies the encoded file into a `Uint8Array`; the page can wrap
/// it in a `Blob` with `mime_type` and save it under `file_name`.
#[wasm_bindgen]
pub struct JsExportedPhoto {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    file_name: String,
    mime_type: String,
}

#[wasm_bindgen]
impl JsExportedPhoto {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Suggested download name, e.g. `passport_photo.jpeg`
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Encoded file contents (copied to JavaScript memory).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<ExportedPhoto> for JsExportedPhoto {
    fn from(photo: ExportedPhoto) -> Self {
        Self {
            file_name: photo.file_name(),
            mime_type: photo.mime_type().to_string(),
            width: photo.width,
            height: photo.height,
            bytes: photo.bytes,
        }
    }
}
