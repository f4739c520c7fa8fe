//! Error taxonomy for loading and cropping.

use thiserror::Error;

/// Errors produced by the crop engine and its loading collaborators.
///
/// Gesture processing never produces an error. Everything else is surfaced
/// once through the session's [`ErrorSink`](crate::session::ErrorSink).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// A capability the host must provide is missing. Fatal.
    #[error("Environment not supported: {0}")]
    EnvironmentUnsupported(String),

    /// No input file was provided.
    #[error("File doesn't exist")]
    FileMissing,

    /// The file could not be read or decoded.
    #[error("Can't load image: {0}")]
    Load(String),

    /// EXIF orientation could not be read. Recoverable, the image is treated
    /// as unrotated.
    #[error("Orientation unavailable: {0}")]
    OrientationUnavailable(String),

    /// The crop window configuration does not resolve to a usable size.
    #[error("Invalid crop window: {0}")]
    InvalidCropWindow(String),

    /// The decoded image has a zero-sized axis.
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A pixel buffer does not match its declared dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    PixelBufferMismatch { expected: usize, actual: usize },

    /// A crop was requested before any image was loaded.
    #[error("No image loaded")]
    NotLoaded,

    /// An internal invariant was broken. Indicates a bug, not bad input.
    #[error("Assertion violated: {0}")]
    AssertionViolation(String),
}

impl CropError {
    /// Returns true if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CropError::EnvironmentUnsupported(_))
    }

    /// Returns true if cropping can proceed despite this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CropError::OrientationUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, CropError>;
