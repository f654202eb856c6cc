//! Export of the cropped photo at the standard's exact pixel size.
//!
//! The crop box lives in preview space. It is mapped back into source-image
//! space through the same [`PreviewGeometry`](crate::geometry::PreviewGeometry)
//! the preview was painted with, then that source region is resampled once
//! into a raster of `standard.pixel_dimensions()`. Parts of the region that
//! fall outside the photo (letterbox bars) keep the background color.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;
use crate::crop::CropBox;
use crate::decode::DecodedImage;
use crate::encode::{encode, EncodeError, ExportFormat};
use crate::geometry::{preview_to_image, PlacedImage, Rect};
use crate::raster::blit_scaled;
use crate::standards::PhotoStandard;

/// JPEG quality used for every export.
pub const JPEG_QUALITY: u8 = 95;

/// Base name of the downloaded file.
pub const FILE_STEM: &str = "passport_photo";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export was requested before any photo was loaded.
    #[error("Please upload an image first.")]
    NoImage,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Output settings for an export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Fill for areas of the crop not covered by the photo.
    pub background: Color,
    /// JPEG quality (1-100), ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            background: Color::default(),
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

/// An encoded photo ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPhoto {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: ExportFormat,
}

impl ExportedPhoto {
    /// `passport_photo.jpeg` or `passport_photo.png`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", FILE_STEM, self.format.extension())
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Resample the cropped region into a `width` x `height` raster.
pub fn render_export(
    source: PlacedImage<'_>,
    crop: &CropBox,
    (width, height): (u32, u32),
    background: Color,
) -> DecodedImage {
    let fill = [background.r, background.g, background.b];
    let mut pixels: Vec<u8> = fill
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 3)
        .collect();

    let region = preview_to_image(crop, source.geometry);
    let target = Rect::new(0.0, 0.0, width as f64, height as f64);
    blit_scaled(source.image, &region, &target, &target, (width, height), |x, y, rgb| {
        let idx = (y as usize * width as usize + x as usize) * 3;
        pixels[idx..idx + 3].copy_from_slice(&rgb);
    });

    DecodedImage::new(width, height, pixels)
}

/// Produce the final encoded photo for the active standard.
///
/// # Errors
///
/// Returns `ExportError::NoImage` when `source` is `None`, and
/// `ExportError::Encode` if the encoder fails.
pub fn export_photo(
    source: Option<PlacedImage<'_>>,
    crop: &CropBox,
    standard: &PhotoStandard,
    options: &ExportOptions,
) -> Result<ExportedPhoto, ExportError> {
    let source = source.ok_or(ExportError::NoImage)?;
    let (width, height) = standard.pixel_dimensions();
    let raster = render_export(source, crop, (width, height), options.background);

    let bytes = encode(
        &raster.pixels,
        width,
        height,
        options.format,
        options.jpeg_quality,
    )?;

    Ok(ExportedPhoto {
        bytes,
        width,
        height,
        format: options.format,
    })
}
