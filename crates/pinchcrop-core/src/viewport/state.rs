//! Viewport state and its initializer.
//!
//! [`ViewportState`] is an immutable value. Initialization and every gesture
//! transition produce a new state, so the invariants can be checked on any
//! snapshot without a rendering surface.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::DOUBLE_TAP_SCALE;
use super::{CropWindow, ImageDimensions, PositionBounds, ScaleBounds};
use crate::error::{CropError, Result};

/// Pan residual (in pixels) above which a pinch leaves a drift correction.
pub const DRIFT_THRESHOLD: f64 = 1.0;

/// The image's render transform relative to the crop window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f64,
    pub pos_x: f64,
    pub pos_y: f64,
}

impl Transform {
    pub fn new(scale: f64, pos_x: f64, pos_y: f64) -> Self {
        Self {
            scale,
            pos_x,
            pos_y,
        }
    }

    /// CSS transform value: translate first, then scale uniformly.
    pub fn css(&self) -> String {
        format!(
            "translate3d({}px, {}px, 0) scale3d({}, {}, 1)",
            self.pos_x, self.pos_y, self.scale, self.scale
        )
    }
}

/// Transform snapshot taken when the last gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommittedTransform {
    pub last_scale: f64,
    pub last_pos_x: f64,
    pub last_pos_y: f64,
}

impl From<Transform> for CommittedTransform {
    fn from(t: Transform) -> Self {
        Self {
            last_scale: t.scale,
            last_pos_x: t.pos_x,
            last_pos_y: t.pos_y,
        }
    }
}

/// Offset subtracted from pan deltas right after a pinch.
///
/// Gesture recognizers keep reporting the pinch's pan residual for a moment
/// after the pinch ends. Without this correction the next pan would jump by
/// that residual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftCorrection {
    pub correct_x: f64,
    pub correct_y: f64,
}

impl DriftCorrection {
    /// Correction left behind by a pinch that ended with the given pan delta.
    pub fn from_residual(delta_x: f64, delta_y: f64) -> Self {
        if delta_x.abs() > DRIFT_THRESHOLD || delta_y.abs() > DRIFT_THRESHOLD {
            Self {
                correct_x: delta_x,
                correct_y: delta_y,
            }
        } else {
            Self::default()
        }
    }

    pub fn is_zero(&self) -> bool {
        self.correct_x == 0.0 && self.correct_y == 0.0
    }
}

/// Everything the engine knows about one crop session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    pub image: ImageDimensions,
    pub window: CropWindow,
    pub transform: Transform,
    pub committed: CommittedTransform,
    pub scale_bounds: ScaleBounds,
    pub position_bounds: PositionBounds,
    pub drift: DriftCorrection,
}

impl ViewportState {
    /// Build the first state for a freshly loaded image.
    ///
    /// The image is fitted to the window when it is larger than the window
    /// on either axis and centered using its unscaled size. Both the scale
    /// and the position are then kept inside their bounds. The zoom range
    /// always reaches the double-tap scale and the covering minimum.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidDimensions` for an empty image,
    /// `CropError::InvalidCropWindow` for an empty window and
    /// `CropError::AssertionViolation` if the bounds cannot be satisfied.
    pub fn initialize(
        image: ImageDimensions,
        window: CropWindow,
        configured_scale_max: f64,
    ) -> Result<Self> {
        if !image.is_valid() {
            return Err(CropError::InvalidDimensions {
                width: image.width.max(0.0) as u32,
                height: image.height.max(0.0) as u32,
            });
        }
        let window_valid = window.width.is_finite()
            && window.height.is_finite()
            && window.width > 0.0
            && window.height > 0.0;
        if !window_valid {
            return Err(CropError::InvalidCropWindow(format!(
                "{}x{}",
                window.width, window.height
            )));
        }

        let mut scale = 1.0;
        if window.height < image.height || window.width < image.width {
            scale = if window.aspect_ratio() > image.aspect_ratio() {
                window.width / image.width
            } else {
                window.height / image.height
            };
        }

        let scale_min = ScaleBounds::fit_min(&image, &window);
        let scale_max = configured_scale_max
            .max(DOUBLE_TAP_SCALE)
            .max(scale_min);
        let scale_bounds = ScaleBounds::new(scale_min, scale_max)?;
        let scale = scale_bounds.clamp(scale);

        let center_x = (image.width - window.width) / 2.0;
        let center_y = (image.height - window.height) / 2.0;

        let position_bounds = PositionBounds::compute(scale, &image, &window);
        position_bounds.validate()?;
        let (pos_x, pos_y) = position_bounds.clamp(-center_x, -center_y);

        let transform = Transform::new(scale, pos_x, pos_y);
        debug!(
            scale,
            scale_min,
            scale_max,
            pos_x,
            pos_y,
            "Viewport initialized"
        );

        Ok(Self {
            image,
            window,
            transform,
            committed: transform.into(),
            scale_bounds,
            position_bounds,
            drift: DriftCorrection::default(),
        })
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// True when no gesture is in progress.
    pub fn is_at_rest(&self) -> bool {
        CommittedTransform::from(self.transform) == self.committed
    }

    /// Check the scale and position invariants of this snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CropError::AssertionViolation` describing the first broken
    /// invariant.
    pub fn check_invariants(&self) -> Result<()> {
        let bounds = self.scale_bounds;
        if bounds.scale_min > bounds.scale_max {
            return Err(CropError::AssertionViolation(format!(
                "scale_min {} exceeds scale_max {}",
                bounds.scale_min, bounds.scale_max
            )));
        }
        if !bounds.contains(self.transform.scale) {
            return Err(CropError::AssertionViolation(format!(
                "scale {} outside [{}, {}]",
                self.transform.scale, bounds.scale_min, bounds.scale_max
            )));
        }
        self.position_bounds.validate()?;
        if !self
            .position_bounds
            .contains(self.transform.pos_x, self.transform.pos_y)
        {
            return Err(CropError::AssertionViolation(format!(
                "position ({}, {}) outside bounds {:?}",
                self.transform.pos_x, self.transform.pos_y, self.position_bounds
            )));
        }
        Ok(())
    }

    /// Same state at a new scale, with bounds recomputed and the current
    /// position pulled back inside them.
    pub(crate) fn rescaled(mut self, scale: f64) -> Self {
        self.transform.scale = scale;
        self.position_bounds = PositionBounds::compute(scale, &self.image, &self.window);
        self.moved_to(self.transform.pos_x, self.transform.pos_y)
    }

    /// Same state with the position clamped into the current bounds.
    pub(crate) fn moved_to(mut self, pos_x: f64, pos_y: f64) -> Self {
        let (x, y) = self.position_bounds.clamp(pos_x, pos_y);
        self.transform.pos_x = x;
        self.transform.pos_y = y;
        self
    }

    /// Same state with the live transform committed as the gesture baseline.
    pub(crate) fn committed(mut self) -> Self {
        self.committed = self.transform.into();
        self
    }
}
