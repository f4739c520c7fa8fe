//! Crop session WASM bindings.
//!
//! `JsCropSession` wraps the core `CropSession` for a browser host: the host
//! forwards gestures from its recognizer, schedules a `requestAnimationFrame`
//! callback whenever a gesture method returns `true`, and paints the
//! transform returned by `take_frame` from that callback.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCropSession({ width: 300, aspectRatio: 1 }, (msg) => showError(msg));
//! session.load(new Uint8Array(await file.arrayBuffer()));
//!
//! hammer.on('pan pinch panend pinchend doubletap', (ev) => {
//!   if (session.gesture({ type: ev.type, deltaX: ev.deltaX, deltaY: ev.deltaY, scale: ev.scale })) {
//!     requestAnimationFrame(() => {
//!       const frame = session.take_frame();
//!       if (frame) wrapper.style.transform = frame.css;
//!     });
//!   }
//! });
//!
//! const crop = session.resolve_crop(); // { cropX, cropY, width, height }
//! ```

use crate::types::{JsDecodedImage, JsTransform};
use pinchcrop_core::{
    CropError, CropSession, CropWindowConfig, ErrorSink, GestureEvent, RawGesture,
};
use wasm_bindgen::prelude::*;

/// Globals the widget needs to read user files.
const REQUIRED_GLOBALS: [&str; 3] = ["File", "FileReader", "Blob"];

/// Forwards session errors to a JS callback, or to the console without one.
///
/// Fatal errors always reach the console as errors, even when a callback
/// handled them.
struct JsErrorSink {
    callback: Option<js_sys::Function>,
}

impl ErrorSink for JsErrorSink {
    fn report(&mut self, error: &CropError) {
        let message = JsValue::from_str(&error.to_string());
        let delivered = self
            .callback
            .as_ref()
            .map(|callback| callback.call1(&JsValue::NULL, &message).is_ok())
            .unwrap_or(false);
        if error.is_fatal() {
            web_sys::console::error_1(&message);
        } else if !delivered {
            web_sys::console::warn_1(&message);
        }
    }
}

fn to_js_error(err: CropError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Fail with `EnvironmentUnsupported` if a required global is missing.
fn check_environment() -> Result<(), CropError> {
    let global = js_sys::global();
    for name in REQUIRED_GLOBALS {
        let present = js_sys::Reflect::has(&global, &JsValue::from_str(name)).unwrap_or(false);
        if !present {
            return Err(CropError::EnvironmentUnsupported(format!(
                "The {} API is not supported",
                name
            )));
        }
    }
    Ok(())
}

/// A crop session for one crop window.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Create a session.
    ///
    /// # Arguments
    /// * `config` - Options object (`width`, `height`, `aspectRatio`,
    ///   `scaleMax`, `template`), or `undefined` for defaults
    /// * `on_error` - Optional callback receiving error messages
    ///
    /// # Errors
    ///
    /// Returns an error if the File APIs are missing or the options do not
    /// resolve to a crop window. Both are also passed to `on_error`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, on_error: Option<js_sys::Function>) -> Result<JsCropSession, JsValue> {
        let mut sink = JsErrorSink { callback: on_error };

        if let Err(err) = check_environment() {
            sink.report(&err);
            return Err(to_js_error(err));
        }

        let config: CropWindowConfig = if config.is_undefined() || config.is_null() {
            CropWindowConfig::default()
        } else {
            match serde_wasm_bindgen::from_value(config) {
                Ok(config) => config,
                Err(e) => {
                    let err = CropError::InvalidCropWindow(format!("invalid options: {}", e));
                    sink.report(&err);
                    return Err(to_js_error(err));
                }
            }
        };

        CropSession::with_sink(config, sink)
            .map(Self::from_session)
            .map_err(to_js_error)
    }

    /// Decode an image and start a new viewport on it.
    ///
    /// Returns the initial transform. A gesture in progress is discarded.
    pub fn load(&mut self, bytes: &[u8]) -> Result<JsTransform, JsValue> {
        self.inner
            .load_bytes(bytes)
            .map(|state| JsTransform::from(state.transform))
            .map_err(to_js_error)
    }

    /// Apply a gesture object `{ type, deltaX?, deltaY?, scale? }`.
    ///
    /// Returns `true` if a frame callback must be scheduled.
    pub fn gesture(&mut self, event: JsValue) -> Result<bool, JsValue> {
        let raw: RawGesture = serde_wasm_bindgen::from_value(event)
            .map_err(|e| JsValue::from_str(&format!("Invalid gesture: {}", e)))?;
        Ok(self.inner.handle_gesture(raw.into()))
    }

    pub fn pan(&mut self, delta_x: f64, delta_y: f64) -> bool {
        self.inner
            .handle_gesture(GestureEvent::Pan { delta_x, delta_y })
    }

    pub fn pan_end(&mut self) -> bool {
        self.inner.handle_gesture(GestureEvent::PanEnd)
    }

    pub fn pinch(&mut self, scale: f64) -> bool {
        self.inner.handle_gesture(GestureEvent::Pinch { scale })
    }

    pub fn pinch_end(&mut self, delta_x: f64, delta_y: f64) -> bool {
        self.inner
            .handle_gesture(GestureEvent::PinchEnd { delta_x, delta_y })
    }

    pub fn double_tap(&mut self) -> bool {
        self.inner.handle_gesture(GestureEvent::DoubleTap)
    }

    /// Latest transform to paint, or `undefined` if nothing changed.
    pub fn take_frame(&mut self) -> Option<JsTransform> {
        self.inner.take_frame().map(JsTransform::from)
    }

    /// Current transform without consuming the pending frame.
    pub fn transform(&self) -> Option<JsTransform> {
        self.inner
            .state()
            .map(|state| JsTransform::from(state.transform))
    }

    /// Selected region as `{ cropX, cropY, width, height }` in source pixels.
    pub fn resolve_crop(&self) -> Result<JsValue, JsValue> {
        let crop = self.inner.resolve_crop().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&crop).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Selected region rendered at native resolution.
    pub fn render_crop(&self) -> Result<JsDecodedImage, JsValue> {
        self.inner
            .render_crop()
            .map(JsDecodedImage::from_decoded)
            .map_err(to_js_error)
    }

    /// Shaded mask sizes `{ bandHeight, sideWidth }` for the host viewport,
    /// or `null` when the template hides it.
    pub fn overlay(&self, viewport_width: f64, viewport_height: f64) -> Result<JsValue, JsValue> {
        let layout = self.inner.overlay(viewport_width, viewport_height);
        serde_wasm_bindgen::to_value(&layout).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Resolved crop window width in pixels.
    #[wasm_bindgen(getter)]
    pub fn window_width(&self) -> f64 {
        self.inner.window().width
    }

    /// Resolved crop window height in pixels.
    #[wasm_bindgen(getter)]
    pub fn window_height(&self) -> f64 {
        self.inner.window().height
    }
}

impl JsCropSession {
    pub(crate) fn from_session(inner: CropSession) -> Self {
        Self { inner }
    }
}
