//! Pinchcrop Core - Viewport transform and crop resolution engine
//!
//! This crate lets a user pan and zoom a photo under a fixed crop window and
//! turns the selection into exact source-pixel crop coordinates, including
//! image loading, EXIF orientation handling and rendering of the cropped
//! region.

pub mod decode;
pub mod error;
pub mod session;
pub mod transform;
pub mod viewport;

pub use decode::{load_image, load_image_file, DecodedImage, LoadedImage, Orientation};
pub use error::{CropError, Result};
pub use session::{CropSession, ErrorSink, LogSink};
pub use transform::render_crop;
pub use viewport::{
    CropResult, CropWindow, CropWindowConfig, GestureEvent, ImageDimensions, RawGesture,
    Transform, ViewportState,
};
