//! WASM bindings for crop rendering.
//!
//! Lets the host re-render a stored crop from an image it already holds,
//! without keeping a session alive.

use crate::types::JsDecodedImage;
use pinchcrop_core::{render_crop as core_render_crop, CropResult};
use wasm_bindgen::prelude::*;

/// Copy a crop rectangle out of an image at native resolution.
///
/// # Arguments
///
/// * `image` - Oriented source image
/// * `crop_x`, `crop_y` - Top-left corner in source pixels
/// * `width`, `height` - Crop size in source pixels
///
/// # Example (TypeScript)
///
/// ```typescript
/// const { cropX, cropY, width, height } = session.resolve_crop();
/// const surface = render_crop(image, cropX, cropY, width, height);
/// ```
#[wasm_bindgen]
pub fn render_crop(
    image: &JsDecodedImage,
    crop_x: f64,
    crop_y: f64,
    width: f64,
    height: f64,
) -> JsDecodedImage {
    let crop = CropResult {
        crop_x,
        crop_y,
        width,
        height,
    };
    JsDecodedImage::from_decoded(core_render_crop(&image.to_decoded(), &crop))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsDecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        JsDecodedImage::checked(width, height, pixels).unwrap()
    }

    #[test]
    fn test_render_crop_region() {
        let surface = render_crop(&gradient(40, 20), 10.0, 5.0, 8.0, 4.0);
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 4);
        assert_eq!(&surface.pixels()[0..2], &[10, 5]);
    }

    #[test]
    fn test_render_crop_minimum_size() {
        let surface = render_crop(&gradient(4, 4), 0.0, 0.0, 0.2, 0.2);
        assert_eq!((surface.width(), surface.height()), (1, 1));
    }
}
