//! Image loading for the crop engine.
//!
//! This module provides:
//! - Decoding of any format enabled in the `image` crate (JPEG, PNG)
//! - EXIF orientation lookup, kept separate from pixel decoding
//! - Rotation of pixels into the orientation-corrected frame on demand
//!
//! # Architecture
//!
//! Loading is the only potentially slow step around the engine. It must
//! complete before a viewport is initialized. A missing orientation tag never
//! blocks loading: the image is treated as unrotated and the condition is
//! reported once through the session's error channel.
//!
//! # Examples
//!
//! ```ignore
//! use pinchcrop_core::decode::load_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let loaded = load_image(&bytes).unwrap();
//! println!("Loaded {}x{} image", loaded.natural_width(), loaded.natural_height());
//! ```

mod load;
mod types;

pub use load::{load_image, load_image_file, read_orientation, LoadedImage};
pub use types::{DecodedImage, Orientation};
