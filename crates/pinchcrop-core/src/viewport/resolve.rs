//! Crop resolution: from the live transform back to source pixels.

use serde::{Deserialize, Serialize};

use super::ViewportState;

/// Visible region in orientation-corrected source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropResult {
    pub crop_x: f64,
    pub crop_y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropResult {
    /// Integer pixel rectangle `(x, y, width, height)` inside an image of
    /// `image_width` x `image_height`.
    ///
    /// Origin and size are rounded to the nearest pixel, the size is at least
    /// 1x1 and at most the image, and the origin is pulled back so the
    /// rectangle never extends past the right or bottom edge.
    pub fn pixel_rect(&self, image_width: u32, image_height: u32) -> (u32, u32, u32, u32) {
        let (x, width) = round_span(self.crop_x, self.width, image_width);
        let (y, height) = round_span(self.crop_y, self.height, image_height);
        (x, y, width, height)
    }
}

fn round_span(start: f64, len: f64, limit: u32) -> (u32, u32) {
    let len = (len.round().max(1.0) as u32).min(limit.max(1));
    let start = (start.round().max(0.0) as u32).min(limit.saturating_sub(len));
    (start, len)
}

impl ViewportState {
    /// Resolve the visible region at native resolution.
    ///
    /// Read-only: calling this any number of times does not affect gesture
    /// processing.
    pub fn resolve_crop(&self) -> CropResult {
        let Self {
            image,
            window,
            transform,
            ..
        } = *self;
        let scale = transform.scale;

        let width = window.width / scale;
        let height = window.height / scale;

        // Positions ignore the centered scaling, so remove its offset first.
        let correct_x = (image.width * scale - image.width) / 2.0;
        let correct_y = (image.height * scale - image.height) / 2.0;

        let crop_x = ((transform.pos_x - correct_x) / scale).abs();
        let crop_y = ((transform.pos_y - correct_y) / scale).abs();

        CropResult {
            crop_x,
            crop_y,
            width,
            height,
        }
    }
}
