//! Photocrop WASM - WebAssembly bindings for Photocrop
//!
//! This crate provides WASM bindings to expose the photocrop-core
//! functionality to the browser page.
//!
//! # Module Structure
//!
//! - `session` - The interactive crop session, canvas painting and download
//! - `standards` - Photo standard catalog and unit conversion
//! - `types` - WASM-compatible wrapper types for export results
//! - `log` - Browser console logging
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, standards } from '@photocrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsCropSession(container.clientWidth);
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.render_to_canvas(canvas);
//! ```

use wasm_bindgen::prelude::*;

mod log;
mod session;
mod standards;
mod types;

// Re-export public types
pub use session::JsCropSession;
pub use standards::{physical_to_pixels, pixel_dimensions_for, standards};
pub use types::JsExportedPhoto;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    log::log_info(&format!("WASM module v{} ready", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
