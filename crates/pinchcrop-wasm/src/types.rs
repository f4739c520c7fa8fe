//! WASM-compatible wrapper types for images and transforms.
//!
//! This module provides JavaScript-friendly types that wrap the core Pinchcrop
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use pinchcrop_core::{CropError, DecodedImage, Transform};
use wasm_bindgen::prelude::*;

/// A decoded image wrapper for JavaScript.
///
/// Used for the rendered crop surface. The pixel data is stored in WASM
/// memory; `pixels()` copies it to a `Uint8Array`.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create a new JsDecodedImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels` is not exactly `width * height * 3` bytes.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsDecodedImage, JsValue> {
        Self::checked(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }
        rgba
    }
}

impl JsDecodedImage {
    pub(crate) fn checked(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, CropError> {
        let expected = width as usize * height as usize * 3;
        if pixels.len() != expected {
            return Err(CropError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Viewport transform to paint on the image wrapper.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsTransform {
    pub scale: f64,
    pub pos_x: f64,
    pub pos_y: f64,
}

#[wasm_bindgen]
impl JsTransform {
    /// CSS `transform` value for the wrapper element.
    #[wasm_bindgen(getter)]
    pub fn css(&self) -> String {
        Transform::from(*self).css()
    }
}

impl From<Transform> for JsTransform {
    fn from(t: Transform) -> Self {
        Self {
            scale: t.scale,
            pos_x: t.pos_x,
            pos_y: t.pos_y,
        }
    }
}

impl From<JsTransform> for Transform {
    fn from(t: JsTransform) -> Self {
        Transform::new(t.scale, t.pos_x, t.pos_y)
    }
}
