//! Photocrop Core - Passport photo cropping library
//!
//! This crate provides the platform-independent core of Photocrop: the
//! photo standards catalog, the coordinate mapping between source image,
//! preview canvas and export raster, the crop-box reducer, preview
//! rendering, and export encoding.
//!
//! # Coordinate spaces
//!
//! - **Image space**: pixels of the decoded source photo.
//! - **Preview space**: pixels of the on-screen canvas. The photo is
//!   letterboxed into it as described by a [`PreviewGeometry`]. The crop box
//!   lives here.
//! - **Export space**: the output raster, sized from the standard's physical
//!   dimensions and DPI.

pub mod color;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
mod raster;
pub mod render;
pub mod session;
pub mod standards;

pub use color::{Color, ColorError};
pub use crop::{CropBox, CropEvent, CropState, Interaction, InteractionMode};
pub use decode::{decode_image, DecodeError, DecodedImage, Orientation};
pub use encode::{encode, EncodeError, ExportFormat};
pub use export::{export_photo, ExportError, ExportOptions, ExportedPhoto};
pub use geometry::{
    fit_rect, image_to_preview, physical_to_pixels, preview_to_image, CanvasSize, PlacedImage,
    Placement, PreviewGeometry, Rect,
};
pub use render::{render_preview, PreviewFrame, RenderStyle};
pub use session::{CropSession, Cursor};
pub use standards::{catalog, default_standard, find_standard, PhotoStandard, StandardError};
