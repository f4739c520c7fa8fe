//! Pixel operations applied to a resolved crop.
//!
//! # Coordinate System
//!
//! - Crop coordinates are in orientation-corrected source pixels
//! - Origin is top-left corner

mod crop;

pub use crop::render_crop;
