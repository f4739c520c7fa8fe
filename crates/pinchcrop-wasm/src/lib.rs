//! Pinchcrop WASM - WebAssembly bindings for Pinchcrop
//!
//! This crate exposes the pinchcrop-core crop session to JavaScript/TypeScript
//! hosts that provide the DOM, the gesture recognizer and the frame loop.
//!
//! # Module Structure
//!
//! - `session` - Crop session: loading, gestures, frames, crop resolution
//! - `types` - WASM-compatible wrapper types for images and transforms
//! - `transform` - Stand-alone crop rendering
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession } from '@pinchcrop/wasm';
//!
//! await init();
//!
//! const session = new JsCropSession({ width: 300, aspectRatio: 4 / 3 });
//! session.load(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod transform;
mod types;

pub use session::JsCropSession;
pub use transform::render_crop;
pub use types::{JsDecodedImage, JsTransform};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
