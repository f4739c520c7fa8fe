//! A crop session: one crop window, the current image and its viewport.
//!
//! The session is the glue between the engine and a host. It loads images,
//! feeds gestures to the viewport, queues frames for the renderer and
//! reports errors through a single [`ErrorSink`].

use std::path::Path;

use tracing::{debug, info, warn};

use crate::decode::{load_image, load_image_file, DecodedImage, LoadedImage};
use crate::error::{CropError, Result};
use crate::transform::render_crop;
use crate::viewport::{
    CropResult, CropWindow, CropWindowConfig, FrameScheduler, GestureEvent, OverlayLayout,
    Transform, ViewportState,
};

/// Receives every error the session reports.
pub trait ErrorSink {
    fn report(&mut self, error: &CropError);
}

/// Sink that logs errors with `tracing`.
///
/// Recoverable errors are logged at info level, everything else as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, error: &CropError) {
        if error.is_recoverable() {
            info!(%error, "Crop session continues");
        } else {
            warn!(%error, "Crop session error");
        }
    }
}

impl<F> ErrorSink for F
where
    F: FnMut(&CropError),
{
    fn report(&mut self, error: &CropError) {
        self(error)
    }
}

pub struct CropSession {
    config: CropWindowConfig,
    window: CropWindow,
    loaded: Option<LoadedImage>,
    state: Option<ViewportState>,
    frames: FrameScheduler,
    sink: Box<dyn ErrorSink>,
}

impl CropSession {
    /// Create a session that logs its errors.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidCropWindow` if the configuration does not
    /// resolve to a window.
    pub fn new(config: CropWindowConfig) -> Result<Self> {
        Self::with_sink(config, LogSink)
    }

    /// Create a session reporting errors to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidCropWindow` if the configuration does not
    /// resolve to a window. The error is reported to `sink` as well.
    pub fn with_sink(config: CropWindowConfig, sink: impl ErrorSink + 'static) -> Result<Self> {
        let mut sink: Box<dyn ErrorSink> = Box::new(sink);
        let window = match config.resolve() {
            Ok(window) => window,
            Err(err) => {
                sink.report(&err);
                return Err(err);
            }
        };

        Ok(Self {
            config,
            window,
            loaded: None,
            state: None,
            frames: FrameScheduler::new(),
            sink,
        })
    }

    pub fn config(&self) -> &CropWindowConfig {
        &self.config
    }

    pub fn window(&self) -> CropWindow {
        self.window
    }

    /// Current viewport, if an image is loaded.
    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    /// Currently loaded image.
    pub fn image(&self) -> Option<&LoadedImage> {
        self.loaded.as_ref()
    }

    /// Decode `bytes` and start a new viewport on it.
    ///
    /// # Errors
    ///
    /// See [`load_image`](Self::load_image). Decode failures are
    /// `CropError::Load`.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&ViewportState> {
        self.reset();
        let loaded = load_image(bytes).map_err(|err| self.reported(err))?;
        self.load_image(loaded)
    }

    /// Read and decode a file and start a new viewport on it.
    ///
    /// # Errors
    ///
    /// `CropError::FileMissing` if the path does not exist, otherwise as
    /// [`load_bytes`](Self::load_bytes).
    pub fn load_file(&mut self, path: &Path) -> Result<&ViewportState> {
        self.reset();
        let loaded = load_image_file(path).map_err(|err| self.reported(err))?;
        self.load_image(loaded)
    }

    /// Start a new viewport on an already loaded image.
    ///
    /// Any gesture in progress on the previous image is discarded and the
    /// pending frame is replaced by the new initial transform. A missing
    /// orientation is reported but does not stop the load.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error if the image or window is unusable.
    pub fn load_image(&mut self, loaded: LoadedImage) -> Result<&ViewportState> {
        self.reset();

        if let Some(err) = loaded.orientation_error.clone() {
            self.sink.report(&err);
        }

        let state = ViewportState::initialize(loaded.dimensions(), self.window, self.config.scale_max)
            .map_err(|err| self.reported(err))?;

        self.frames.request(state.transform);
        self.loaded = Some(loaded);
        Ok(self.state.insert(state))
    }

    /// Apply one gesture.
    ///
    /// Returns true if the host has to schedule a refresh callback, which
    /// should then call [`take_frame`](Self::take_frame). Gestures arriving
    /// before an image is loaded are dropped.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        *state = state.apply(event);
        self.frames.request(state.transform)
    }

    /// Latest transform to paint, if one is pending.
    pub fn take_frame(&mut self) -> Option<Transform> {
        let frame = self.frames.take();
        if frame.is_some() {
            debug!(coalesced = self.frames.coalesced(), "Frame taken");
        }
        frame
    }

    /// Number of gesture updates merged into an already pending frame since
    /// the session was created.
    pub fn coalesced_frames(&self) -> u64 {
        self.frames.coalesced()
    }

    /// Resolve the current selection.
    ///
    /// # Errors
    ///
    /// Returns `CropError::NotLoaded` before the first successful load.
    pub fn resolve_crop(&self) -> Result<CropResult> {
        self.state
            .as_ref()
            .map(ViewportState::resolve_crop)
            .ok_or(CropError::NotLoaded)
    }

    /// Render the current selection at native resolution.
    ///
    /// # Errors
    ///
    /// Returns `CropError::NotLoaded` before the first successful load.
    pub fn render_crop(&self) -> Result<DecodedImage> {
        let crop = self.resolve_crop()?;
        let loaded = self.loaded.as_ref().ok_or(CropError::NotLoaded)?;
        Ok(render_crop(&loaded.oriented(), &crop))
    }

    /// Shaded mask layout for a host viewport of the given size.
    pub fn overlay(&self, viewport_width: f64, viewport_height: f64) -> Option<OverlayLayout> {
        OverlayLayout::compute(
            viewport_width,
            viewport_height,
            &self.config.template,
            &self.window,
        )
    }

    fn reset(&mut self) {
        self.loaded = None;
        self.state = None;
        self.frames.clear();
    }

    fn reported(&mut self, err: CropError) -> CropError {
        self.sink.report(&err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 0])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn recording_session() -> (CropSession, Rc<RefCell<Vec<CropError>>>) {
        let errors = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&errors);
        let session = CropSession::with_sink(
            CropWindowConfig::with_size(30.0, 30.0),
            move |err: &CropError| recorded.borrow_mut().push(err.clone()),
        )
        .unwrap();
        (session, errors)
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = CropSession::new(CropWindowConfig::default());
        assert!(matches!(result, Err(CropError::InvalidCropWindow(_))));
    }

    #[test]
    fn test_crop_before_load() {
        let session = CropSession::new(CropWindowConfig::with_size(30.0, 30.0)).unwrap();
        assert_eq!(session.resolve_crop().unwrap_err(), CropError::NotLoaded);
        assert!(session.render_crop().is_err());
    }

    #[test]
    fn test_gesture_before_load_is_dropped() {
        let mut session = CropSession::new(CropWindowConfig::with_size(30.0, 30.0)).unwrap();
        assert!(!session.handle_gesture(GestureEvent::DoubleTap));
        assert_eq!(session.take_frame(), None);
    }

    #[test]
    fn test_load_reports_missing_orientation_once() {
        let (mut session, errors) = recording_session();
        let state = *session.load_bytes(&png_bytes(100, 50)).unwrap();

        assert!((state.scale() - 0.6).abs() < 1e-12);
        let errors = errors.borrow();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], CropError::OrientationUnavailable(_)));
    }

    #[test]
    fn test_load_failure_is_reported() {
        let (mut session, errors) = recording_session();
        let result = session.load_bytes(&[1, 2, 3]);

        assert!(matches!(result, Err(CropError::Load(_))));
        assert_eq!(errors.borrow().len(), 1);
        assert!(session.state().is_none());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let (mut session, errors) = recording_session();
        let result = session.load_file(Path::new("/nonexistent/pinchcrop.png"));
        assert!(matches!(result, Err(CropError::FileMissing)));
        assert_eq!(errors.borrow()[0], CropError::FileMissing);
    }

    #[test]
    fn test_initial_frame_is_queued() {
        let (mut session, _) = recording_session();
        let initial = session.load_bytes(&png_bytes(100, 50)).unwrap().transform;

        assert_eq!(session.take_frame(), Some(initial));
        assert_eq!(session.take_frame(), None);
    }

    #[test]
    fn test_gestures_coalesce_into_one_frame() {
        let (mut session, _) = recording_session();
        session.load_bytes(&png_bytes(100, 50)).unwrap();
        session.take_frame();

        assert!(session.handle_gesture(GestureEvent::Pan {
            delta_x: -2.0,
            delta_y: 0.0
        }));
        assert!(!session.handle_gesture(GestureEvent::Pan {
            delta_x: -4.0,
            delta_y: 0.0
        }));
        assert_eq!(session.coalesced_frames(), 1);

        let frame = session.take_frame().unwrap();
        assert_eq!(frame, session.state().unwrap().transform);
    }

    #[test]
    fn test_reload_resets_gesture_in_flight() {
        let (mut session, _) = recording_session();
        let bytes = png_bytes(100, 50);
        let initial = *session.load_bytes(&bytes).unwrap();

        session.handle_gesture(GestureEvent::Pinch { scale: 2.0 });
        assert_ne!(session.state().unwrap().transform, initial.transform);

        let reloaded = *session.load_bytes(&bytes).unwrap();
        assert_eq!(reloaded, initial);
        assert_eq!(session.take_frame(), Some(initial.transform));
    }

    #[test]
    fn test_render_crop_matches_resolved_size() {
        let (mut session, _) = recording_session();
        session.load_bytes(&png_bytes(100, 50)).unwrap();

        let crop = session.resolve_crop().unwrap();
        let surface = session.render_crop().unwrap();
        assert_eq!(surface.width, crop.width.round() as u32);
        assert_eq!(surface.height, crop.height.round() as u32);
        // Red channel holds the source x coordinate
        assert_eq!(surface.pixels[0] as f64, crop.crop_x.round());
    }

    #[test]
    fn test_overlay_uses_template() {
        let session = CropSession::new(CropWindowConfig::with_size(300.0, 200.0)).unwrap();
        let layout = session.overlay(800.0, 600.0).unwrap();
        assert_eq!(layout.side_width, 248.0);
    }
}
