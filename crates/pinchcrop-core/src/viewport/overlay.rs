//! Shaded mask around the crop window.

use serde::{Deserialize, Serialize};

use super::{CropWindow, TemplateConfig};

/// Border drawn around the crop window, in pixels.
const FRAME_BORDER: f64 = 2.0;

/// Sizes of the four shaded bands around a centered crop window.
///
/// The top and bottom bands span the full width with `band_height`. The
/// left and right bands sit between them with `side_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayout {
    pub band_height: f64,
    pub side_width: f64,
}

impl OverlayLayout {
    /// Lay out the mask for a viewport of the given size.
    ///
    /// Returns `None` when the template hides the surrounding box.
    pub fn compute(
        viewport_width: f64,
        viewport_height: f64,
        template: &TemplateConfig,
        window: &CropWindow,
    ) -> Option<Self> {
        if template.hide_around_box {
            return None;
        }

        let band_height =
            (viewport_height - template.bar_height - window.height) / 2.0 - FRAME_BORDER;
        let side_width = (viewport_width - window.width) / 2.0 - FRAME_BORDER;

        Some(Self {
            band_height: band_height.max(0.0),
            side_width: side_width.max(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_centered_window() {
        let template = TemplateConfig::default();
        let window = CropWindow::new(300.0, 200.0);

        let layout = OverlayLayout::compute(800.0, 600.0, &template, &window).unwrap();
        assert_eq!(layout.band_height, 198.0);
        assert_eq!(layout.side_width, 248.0);
    }

    #[test]
    fn test_layout_accounts_for_bar() {
        let template = TemplateConfig {
            bar_height: 44.0,
            hide_around_box: false,
        };
        let window = CropWindow::new(300.0, 200.0);

        let layout = OverlayLayout::compute(800.0, 600.0, &template, &window).unwrap();
        assert_eq!(layout.band_height, 176.0);
    }

    #[test]
    fn test_layout_hidden() {
        let template = TemplateConfig {
            bar_height: 0.0,
            hide_around_box: true,
        };
        let window = CropWindow::new(300.0, 200.0);
        assert!(OverlayLayout::compute(800.0, 600.0, &template, &window).is_none());
    }

    #[test]
    fn test_layout_never_negative() {
        let template = TemplateConfig::default();
        let window = CropWindow::new(1000.0, 1000.0);

        let layout = OverlayLayout::compute(800.0, 600.0, &template, &window).unwrap();
        assert_eq!(layout.band_height, 0.0);
        assert_eq!(layout.side_width, 0.0);
    }
}
