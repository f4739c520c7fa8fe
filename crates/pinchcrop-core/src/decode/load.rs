//! Image loading with EXIF orientation lookup.
//!
//! Pixels are decoded as stored in the file. The orientation is read
//! separately so the viewport can normalize dimensions before any pixel
//! work happens, and [`LoadedImage::oriented`] rotates the pixels into the
//! same frame only when a crop surface is rendered.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodedImage, Orientation};
use crate::error::{CropError, Result};
use crate::viewport::ImageDimensions;

/// A decoded image together with its EXIF orientation.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Pixels as stored in the file (orientation not applied).
    pub image: DecodedImage,
    /// Raw EXIF orientation code, 0 when the tag could not be read.
    pub orientation_code: u32,
    /// Set when orientation lookup failed. Loading still succeeds.
    pub orientation_error: Option<CropError>,
}

impl LoadedImage {
    /// Width as stored in the file.
    pub fn natural_width(&self) -> u32 {
        self.image.width
    }

    /// Height as stored in the file.
    pub fn natural_height(&self) -> u32 {
        self.image.height
    }

    /// Parsed orientation.
    pub fn orientation(&self) -> Orientation {
        Orientation::from(self.orientation_code)
    }

    /// Orientation-corrected dimensions used by the viewport.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::oriented(
            self.natural_width() as f64,
            self.natural_height() as f64,
            self.orientation_code,
        )
    }

    /// Pixels rotated into the frame described by [`dimensions`](Self::dimensions).
    ///
    /// Mirrored orientations are left untouched, matching the normalizer.
    pub fn oriented(&self) -> DecodedImage {
        let rotate: fn(&DynamicImage) -> DynamicImage = match self.orientation() {
            Orientation::Rotate180 => DynamicImage::rotate180,
            Orientation::Rotate90CW => DynamicImage::rotate90,
            Orientation::Rotate270CW => DynamicImage::rotate270,
            _ => return self.image.clone(),
        };

        match self.image.to_rgb_image() {
            Some(rgb) => {
                let rotated = rotate(&DynamicImage::ImageRgb8(rgb));
                DecodedImage::from_rgb_image(rotated.into_rgb8())
            }
            None => self.image.clone(),
        }
    }
}

/// Decode an image from bytes and look up its EXIF orientation.
///
/// # Errors
///
/// Returns `CropError::Load` if the bytes cannot be decoded and
/// `CropError::InvalidDimensions` if the decoded image has a zero axis.
/// A missing or unreadable orientation is not an error here; it is recorded
/// in [`LoadedImage::orientation_error`].
pub fn load_image(bytes: &[u8]) -> Result<LoadedImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropError::Load(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| CropError::Load(e.to_string()))?;

    let image = DecodedImage::from_rgb_image(img.into_rgb8());
    if image.width == 0 || image.height == 0 {
        return Err(CropError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let (orientation_code, orientation_error) = match read_orientation(bytes) {
        Ok(code) => (code, None),
        Err(err) => (0, Some(err)),
    };

    debug!(
        width = image.width,
        height = image.height,
        orientation = orientation_code,
        "Image loaded"
    );

    Ok(LoadedImage {
        image,
        orientation_code,
        orientation_error,
    })
}

/// Read a file from disk and load it with [`load_image`].
///
/// # Errors
///
/// Returns `CropError::FileMissing` if the path does not exist and
/// `CropError::Load` if it cannot be read or decoded.
pub fn load_image_file(path: &Path) -> Result<LoadedImage> {
    if !path.exists() {
        return Err(CropError::FileMissing);
    }
    let bytes = std::fs::read(path).map_err(|e| CropError::Load(e.to_string()))?;
    load_image(&bytes)
}

/// Read the raw EXIF orientation code from image bytes.
///
/// # Errors
///
/// Returns `CropError::OrientationUnavailable` if there is no EXIF block or
/// it carries no usable orientation tag.
pub fn read_orientation(bytes: &[u8]) -> Result<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new()
        .read_from_container(&mut cursor)
        .map_err(|e| CropError::OrientationUnavailable(e.to_string()))?;

    let field = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .ok_or_else(|| CropError::OrientationUnavailable("Orientation tag not present".into()))?;

    field
        .value
        .get_uint(0)
        .ok_or_else(|| CropError::OrientationUnavailable("Orientation tag is not numeric".into()))
}
