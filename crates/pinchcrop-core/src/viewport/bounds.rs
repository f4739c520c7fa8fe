//! Scale range and the position clamper.
//!
//! # Coordinate System
//!
//! Positions are the image's translation relative to the crop window's top
//! left corner, before scaling. Scaling happens about the image's own
//! center, so at scale `s` the image's left edge sits at
//! `pos_x - (s * width - width) / 2`.

use serde::{Deserialize, Serialize};

use super::{CropWindow, ImageDimensions};
use crate::error::{CropError, Result};

/// Slack allowed when checking bounds that meet exactly at `scale_min`.
pub const BOUNDS_TOLERANCE: f64 = 1e-6;

/// Allowed zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub scale_min: f64,
    pub scale_max: f64,
}

impl ScaleBounds {
    /// # Errors
    ///
    /// Returns `CropError::AssertionViolation` unless
    /// `0 < scale_min <= scale_max` with both finite.
    pub fn new(scale_min: f64, scale_max: f64) -> Result<Self> {
        let valid = scale_min.is_finite()
            && scale_max.is_finite()
            && scale_min > 0.0
            && scale_min <= scale_max;
        if !valid {
            return Err(CropError::AssertionViolation(format!(
                "scale bounds [{}, {}] are empty",
                scale_min, scale_max
            )));
        }
        Ok(Self {
            scale_min,
            scale_max,
        })
    }

    /// Smallest scale at which the image still covers the window.
    ///
    /// The tighter axis decides: a window narrower than the image is limited
    /// by height, otherwise by width.
    pub fn fit_min(image: &ImageDimensions, window: &CropWindow) -> f64 {
        if window.aspect_ratio() < image.aspect_ratio() {
            window.height / image.height
        } else {
            window.width / image.width
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.min(self.scale_max).max(self.scale_min)
    }

    pub fn contains(&self, scale: f64) -> bool {
        scale >= self.scale_min && scale <= self.scale_max
    }
}

/// Legal translation range for one scale.
///
/// `min_*` aligns the image's left/top edge with the window, `max_*` its
/// right/bottom edge, so `max_x <= min_x` whenever the image covers the
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl PositionBounds {
    pub fn compute(scale: f64, image: &ImageDimensions, window: &CropWindow) -> Self {
        let curr_width = scale * image.width;
        let curr_height = scale * image.height;

        let min_x = (curr_width - image.width) / 2.0;
        let min_y = (curr_height - image.height) / 2.0;

        Self {
            min_x,
            min_y,
            max_x: -(curr_width - min_x - window.width),
            max_y: -(curr_height - min_y - window.height),
        }
    }

    /// True if some position keeps the window covered on both axes.
    pub fn is_non_empty(&self) -> bool {
        self.min_x - self.max_x >= -BOUNDS_TOLERANCE && self.min_y - self.max_y >= -BOUNDS_TOLERANCE
    }

    /// # Errors
    ///
    /// Returns `CropError::AssertionViolation` if the range is empty, which
    /// means the scale dropped below the covering minimum.
    pub fn validate(&self) -> Result<()> {
        if self.is_non_empty() {
            Ok(())
        } else {
            Err(CropError::AssertionViolation(format!(
                "position bounds are empty: x in [{}, {}], y in [{}, {}]",
                self.max_x, self.min_x, self.max_y, self.min_y
            )))
        }
    }

    /// Pull a candidate position back inside the range.
    ///
    /// The upper bound is applied first, so an empty range resolves to the
    /// right/bottom edge.
    pub fn clamp(&self, pos_x: f64, pos_y: f64) -> (f64, f64) {
        debug_assert!(self.is_non_empty(), "clamping into empty bounds: {:?}", self);

        let mut x = pos_x;
        let mut y = pos_y;
        if x > self.min_x {
            x = self.min_x;
        }
        if x < self.max_x {
            x = self.max_x;
        }
        if y > self.min_y {
            y = self.min_y;
        }
        if y < self.max_y {
            y = self.max_y;
        }
        (x, y)
    }

    pub fn contains(&self, pos_x: f64, pos_y: f64) -> bool {
        pos_x <= self.min_x + BOUNDS_TOLERANCE
            && pos_x >= self.max_x - BOUNDS_TOLERANCE
            && pos_y <= self.min_y + BOUNDS_TOLERANCE
            && pos_y >= self.max_y - BOUNDS_TOLERANCE
    }
}
