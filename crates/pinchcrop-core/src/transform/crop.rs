//! Rendering of a resolved crop.
//!
//! The surface is the crop size rounded to whole pixels, with the source
//! image drawn at `(-crop_x, -crop_y)` and scale 1. Rounding never moves the
//! surface past the image edges. No resampling happens; downscaling the
//! result is left to the caller.
//!
//! # Example
//!
//! ```ignore
//! let crop = state.resolve_crop();
//! let surface = render_crop(&loaded.oriented(), &crop);
//! ```

use crate::decode::DecodedImage;
use crate::viewport::CropResult;

/// Copy the region described by `crop` out of `image`.
///
/// # Behavior
///
/// - Crop coordinates are rounded to the nearest pixel
/// - Minimum output dimension is 1x1 pixels
/// - A rectangle reaching past an edge is shifted back inside the image
///   and shrunk to the image size if larger
/// - An empty image or a short pixel buffer yields a black surface
pub fn render_crop(image: &DecodedImage, crop: &CropResult) -> DecodedImage {
    let (px_left, px_top, out_width, out_height) = crop.pixel_rect(image.width, image.height);

    let mut output = vec![0u8; (out_width * out_height * 3) as usize];

    let expected_len = image.width as usize * image.height as usize * 3;
    if !image.is_empty() && image.pixels.len() >= expected_len {
        let row_len = (out_width * 3) as usize;
        for y in 0..out_height {
            let src_start = (((px_top + y) * image.width + px_left) * 3) as usize;
            let dst_start = (y * out_width * 3) as usize;

            output[dst_start..dst_start + row_len]
                .copy_from_slice(&image.pixels[src_start..src_start + row_len]);
        }
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}
