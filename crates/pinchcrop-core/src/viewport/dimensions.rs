//! Image and crop window sizes, and the orientation normalizer.

use serde::{Deserialize, Serialize};

use crate::decode::Orientation;

/// Orientation-corrected natural size of the loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

impl ImageDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a natural size and EXIF orientation code to the size the viewport
    /// works with.
    ///
    /// Codes 6 and 8 (90° and 270° rotations) swap the axes. Every other code,
    /// including 0 for an absent tag, leaves them unchanged.
    pub fn oriented(natural_width: f64, natural_height: f64, orientation: u32) -> Self {
        if Orientation::from(orientation).swaps_dimensions() {
            Self::new(natural_height, natural_width)
        } else {
            Self::new(natural_width, natural_height)
        }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// True if both axes are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Fixed on-screen crop frame size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropWindow {
    pub width: f64,
    pub height: f64,
}

impl CropWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oriented_swaps_for_rotations() {
        assert_eq!(
            ImageDimensions::oriented(6000.0, 4000.0, 6),
            ImageDimensions::new(4000.0, 6000.0)
        );
        assert_eq!(
            ImageDimensions::oriented(6000.0, 4000.0, 8),
            ImageDimensions::new(4000.0, 6000.0)
        );
    }

    #[test]
    fn test_oriented_keeps_other_codes() {
        for code in [0, 1, 2, 3, 4, 5, 7, 42] {
            assert_eq!(
                ImageDimensions::oriented(6000.0, 4000.0, code),
                ImageDimensions::new(6000.0, 4000.0),
                "code {}",
                code
            );
        }
    }

    #[test]
    fn test_aspect_ratios() {
        assert!((ImageDimensions::new(1000.0, 500.0).aspect_ratio() - 2.0).abs() < 1e-12);
        assert!((CropWindow::new(300.0, 300.0).aspect_ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validity() {
        assert!(ImageDimensions::new(1.0, 1.0).is_valid());
        assert!(!ImageDimensions::new(0.0, 1.0).is_valid());
        assert!(!ImageDimensions::new(f64::NAN, 1.0).is_valid());
    }
}
