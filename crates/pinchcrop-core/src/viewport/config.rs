//! Crop window configuration.
//!
//! Field names are camelCase on the wire so the same struct can be built
//! from a JavaScript options object or a TOML file.

use serde::{Deserialize, Serialize};

use super::CropWindow;
use crate::error::{CropError, Result};

/// Aspect ratio used when none is configured.
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Width used when only a height and an aspect ratio are configured.
pub const DEFAULT_WIDTH: f64 = 200.0;

/// Double-tap zooms to this scale, so the scale range always reaches it.
pub const DOUBLE_TAP_SCALE: f64 = 2.0;

/// Options controlling the crop window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropWindowConfig {
    /// Crop window width in pixels (0 = unset).
    pub width: f64,
    /// Crop window height in pixels (0 = unset).
    pub height: f64,
    /// Width / height. When set, it derives one side from the other.
    pub aspect_ratio: Option<f64>,
    /// Configured upper zoom bound. Raised to at least 2.
    pub scale_max: f64,
    /// Presentation of the area around the crop window.
    pub template: TemplateConfig,
}

impl Default for CropWindowConfig {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            aspect_ratio: Some(DEFAULT_ASPECT_RATIO),
            scale_max: 1.0,
            template: TemplateConfig::default(),
        }
    }
}

/// Layout of the shaded area around the crop window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateConfig {
    /// Height of a toolbar docked above the crop area.
    pub bar_height: f64,
    /// Do not shade the area around the crop window.
    pub hide_around_box: bool,
}

impl CropWindowConfig {
    /// Crop window with the given size and no aspect ratio.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            aspect_ratio: None,
            ..Self::default()
        }
    }

    /// Resolve the configured values into a concrete crop window.
    ///
    /// With an aspect ratio, a lone height falls back to width 200 and the
    /// height is then always derived from the width.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidCropWindow` if the aspect ratio is not a
    /// positive number or the result is not a positive finite size.
    pub fn resolve(&self) -> Result<CropWindow> {
        let mut width = self.width;
        let mut height = self.height;

        if let Some(ratio) = self.aspect_ratio.filter(|r| *r != 0.0) {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(CropError::InvalidCropWindow(format!(
                    "aspect ratio {} is not a positive number",
                    ratio
                )));
            }
            if width == 0.0 && height != 0.0 {
                width = DEFAULT_WIDTH;
            }
            if width != 0.0 {
                height = width / ratio;
            }
        }

        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CropError::InvalidCropWindow(format!(
                "resolved size {}x{} is not positive",
                width, height
            )));
        }

        Ok(CropWindow::new(width, height))
    }
}
