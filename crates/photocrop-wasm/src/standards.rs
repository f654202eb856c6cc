//! Standards catalog and unit conversion bindings.
//!
//! # Example
//!
//! ```typescript
//! import { standards, pixel_dimensions_for } from '@photocrop/wasm';
//!
//! for (const s of standards()) {
//!   const [w, h] = pixel_dimensions_for(s.name);
//!   console.log(`${s.name}: ${w}x${h} px`);
//! }
//! ```

use photocrop_core::{catalog, find_standard, geometry, StandardError};
use wasm_bindgen::prelude::*;

/// All supported standards as `{ name, widthMM, heightMM, dpi }` objects.
#[wasm_bindgen]
pub fn standards() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(catalog())
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize standards: {}", e)))
}

/// Convert a physical length in millimeters to pixels at `dpi`.
#[wasm_bindgen]
pub fn physical_to_pixels(length_mm: f64, dpi: u32) -> f64 {
    geometry::physical_to_pixels(length_mm, dpi)
}

/// Export size `[width, height]` of the named standard.
///
/// # Errors
///
/// Returns an error if no standard has that name.
#[wasm_bindgen]
pub fn pixel_dimensions_for(name: &str) -> Result<Vec<u32>, JsValue> {
    standard_pixel_size(name)
        .map(|(w, h)| vec![w, h])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn standard_pixel_size(name: &str) -> Result<(u32, u32), StandardError> {
    find_standard(name).map(|s| s.pixel_dimensions())
}
