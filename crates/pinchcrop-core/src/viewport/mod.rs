//! Viewport transform and crop resolution engine.
//!
//! The engine keeps a scaled, translated image fully covering a fixed crop
//! window while the user pans and zooms, and turns the final transform back
//! into a crop rectangle in source pixels.
//!
//! # Data Flow
//!
//! 1. [`ImageDimensions::oriented`] normalizes the image size for EXIF rotation
//! 2. [`ViewportState::initialize`] fits and centers the image once per load
//! 3. [`ViewportState::apply`] runs for every gesture
//! 4. [`PositionBounds`] is consulted by both of the above
//! 5. [`ViewportState::resolve_crop`] runs on demand
//!
//! # Coordinate System
//!
//! - Positions are in window pixels, relative to the window's top-left corner
//! - The image scales about its own center
//! - Crop results are in orientation-corrected source pixels

mod bounds;
mod config;
mod dimensions;
mod frame;
mod gesture;
mod overlay;
mod resolve;
mod state;

pub use bounds::{PositionBounds, ScaleBounds, BOUNDS_TOLERANCE};
pub use config::{
    CropWindowConfig, TemplateConfig, DEFAULT_ASPECT_RATIO, DEFAULT_WIDTH, DOUBLE_TAP_SCALE,
};
pub use dimensions::{CropWindow, ImageDimensions};
pub use frame::FrameScheduler;
pub use gesture::{GestureEvent, GestureKind, RawGesture};
pub use overlay::OverlayLayout;
pub use resolve::CropResult;
pub use state::{CommittedTransform, DriftCorrection, Transform, ViewportState, DRIFT_THRESHOLD};
