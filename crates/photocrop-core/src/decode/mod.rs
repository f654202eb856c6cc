//! Image decoding for user-supplied photos.
//!
//! This module provides functionality for:
//! - Decoding JPEG and PNG files into RGB pixel buffers
//! - Applying EXIF orientation so the pixels match what the user sees
//!
//! Anything other than JPEG or PNG is rejected, even if the `image` crate
//! could otherwise read it.

mod photo;
mod types;

pub use photo::{decode_image, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
