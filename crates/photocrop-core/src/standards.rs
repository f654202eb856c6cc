//! Physical photo standards and the fixed catalog of supported formats.
//!
//! A standard describes a printed document photo: its size in millimeters
//! and the print resolution. It is descriptive metadata only; nothing here
//! checks that an exported photo satisfies biometric rules.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{physical_to_pixels, round_to_pixels};

/// Errors raised when looking up a standard.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandardError {
    /// No catalog entry carries the requested name.
    #[error("Unknown photo standard: {0}")]
    Unknown(String),
}

/// A named physical photo specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoStandard {
    /// Display name, unique within the catalog.
    pub name: Cow<'static, str>,
    /// Printed width in millimeters.
    #[serde(rename = "widthMM")]
    pub width_mm: f64,
    /// Printed height in millimeters.
    #[serde(rename = "heightMM")]
    pub height_mm: f64,
    /// Print resolution in dots per inch.
    pub dpi: u32,
}

impl PhotoStandard {
    /// Create a standard with a static name (used to build the catalog).
    pub const fn new(name: &'static str, width_mm: f64, height_mm: f64, dpi: u32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            width_mm,
            height_mm,
            dpi,
        }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }

    /// Height of a box with the given width and this standard's proportions.
    pub fn height_for_width(&self, width: f64) -> f64 {
        width * (self.height_mm / self.width_mm)
    }

    /// Width of a box with the given height and this standard's proportions.
    pub fn width_for_height(&self, height: f64) -> f64 {
        height * (self.width_mm / self.height_mm)
    }

    /// Exact (unrounded) output size in pixels.
    pub fn physical_pixels(&self) -> (f64, f64) {
        (
            physical_to_pixels(self.width_mm, self.dpi),
            physical_to_pixels(self.height_mm, self.dpi),
        )
    }

    /// Output raster size in whole pixels.
    ///
    /// Each axis is rounded to the nearest integer (half away from zero)
    /// with a minimum of one pixel.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        let (w, h) = self.physical_pixels();
        (round_to_pixels(w), round_to_pixels(h))
    }
}

static CATALOG: [PhotoStandard; 5] = [
    PhotoStandard::new("US Passport (2x2 in)", 51.0, 51.0, 300),
    PhotoStandard::new("UK Passport (35x45 mm)", 35.0, 45.0, 600),
    PhotoStandard::new("Indian Visa (51x51 mm)", 51.0, 51.0, 300),
    PhotoStandard::new("Schengen Visa (35x45 mm)", 35.0, 45.0, 600),
    PhotoStandard::new("Canadian Passport (50x70 mm)", 50.0, 70.0, 600),
];

/// All supported standards in display order.
pub fn catalog() -> &'static [PhotoStandard] {
    &CATALOG
}

/// The standard selected when a session starts.
pub fn default_standard() -> &'static PhotoStandard {
    &CATALOG[0]
}

/// Look up a catalog entry by its display name.
pub fn find_standard(name: &str) -> Result<&'static PhotoStandard, StandardError> {
    CATALOG
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| StandardError::Unknown(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_unique_names() {
        let names: Vec<&str> = catalog().iter().map(|s| s.name.as_ref()).collect();
        assert_eq!(names.len(), 5);
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate name {name}");
        }
    }

    #[test]
    fn test_catalog_values_positive() {
        for s in catalog() {
            assert!(s.width_mm > 0.0);
            assert!(s.height_mm > 0.0);
            assert!(s.dpi > 0);
        }
    }

    #[test]
    fn test_default_is_us_passport() {
        assert_eq!(default_standard().name, "US Passport (2x2 in)");
    }

    #[test]
    fn test_find_standard() {
        let uk = find_standard("UK Passport (35x45 mm)").unwrap();
        assert_eq!(uk.width_mm, 35.0);
        assert_eq!(uk.height_mm, 45.0);
        assert_eq!(uk.dpi, 600);
    }

    #[test]
    fn test_find_unknown_standard() {
        let err = find_standard("Martian Visa").unwrap_err();
        assert_eq!(err, StandardError::Unknown("Martian Visa".to_string()));
        assert_eq!(err.to_string(), "Unknown photo standard: Martian Visa");
    }

    #[test]
    fn test_us_pixel_dimensions() {
        // 51 / 25.4 * 300 = 602.36
        let us = find_standard("US Passport (2x2 in)").unwrap();
        assert_eq!(us.pixel_dimensions(), (602, 602));
    }

    #[test]
    fn test_uk_pixel_dimensions() {
        // 826.77 x 1062.99
        let uk = find_standard("UK Passport (35x45 mm)").unwrap();
        assert_eq!(uk.pixel_dimensions(), (827, 1063));
    }

    #[test]
    fn test_canadian_pixel_dimensions() {
        // 1181.10 x 1653.54
        let ca = find_standard("Canadian Passport (50x70 mm)").unwrap();
        assert_eq!(ca.pixel_dimensions(), (1181, 1654));
    }

    #[test]
    fn test_height_for_width() {
        let uk = find_standard("UK Passport (35x45 mm)").unwrap();
        assert!((uk.height_for_width(400.0) - 514.2857142857143).abs() < 1e-9);
        assert!((uk.width_for_height(uk.height_for_width(123.0)) - 123.0).abs() < 1e-9);
        assert!((uk.aspect_ratio() - 0.7777777777777778).abs() < 1e-12);
    }
}
