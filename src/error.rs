//! Error types shared across sessions, storage and result actions

use std::io;
use thiserror::Error;

/// Invalid style input (colors, error-correction names)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// Color is not `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
    #[error("invalid color '{0}'")]
    InvalidColor(String),
    /// Unknown error-correction level name
    #[error("unknown error correction level '{0}'")]
    InvalidLevel(String),
}

/// Failures reported while rendering text as a QR raster
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Text does not fit the chosen error-correction capacity
    #[error("cannot encode text: {0}")]
    Capacity(String),
    /// Requested width cannot hold one pixel per module
    #[error("width {width}px is smaller than the {required} modules needed")]
    WidthTooSmall {
        /// Requested pixel width
        width: u32,
        /// Modules across, margin included
        required: u32,
    },
    /// Quiet zone too wide to lay out
    #[error("margin of {margin} modules is too large")]
    MarginTooLarge {
        /// Requested margin in modules
        margin: u32,
    },
    /// Requested width exceeds the supported maximum
    #[error("width {width}px exceeds the {max}px maximum")]
    WidthTooLarge {
        /// Requested pixel width
        width: u32,
        /// Largest supported width
        max: u32,
    },
}

/// Camera acquisition and capture failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// The user or the platform refused access to the device
    #[error("camera permission denied")]
    PermissionDenied,
    /// No capture device was found
    #[error("no camera device found")]
    DeviceMissing,
    /// Capture requires a secure context the caller does not have
    #[error("camera access requires a secure context")]
    InsecureContext,
    /// Capture is not available in this environment
    #[error("camera capture is not supported")]
    Unsupported,
    /// Anything else
    #[error("camera error: {0}")]
    Other(String),
}

impl CameraError {
    /// Classify an I/O failure raised while opening a capture device
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            io::ErrorKind::NotFound => CameraError::DeviceMissing,
            io::ErrorKind::Unsupported => CameraError::Unsupported,
            _ => CameraError::Other(err.to_string()),
        }
    }
}

/// Key-value storage failures
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key contains characters that cannot name a stored value
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
    /// Filesystem failure
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// History store failures and rejections
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Candidate text is empty
    #[error("nothing to save: result is empty")]
    EmptyText,
    /// Candidate text is a status or error marker, not a result
    #[error("nothing to save: result is a status message")]
    ReservedMarker,
    /// No result has been produced yet
    #[error("nothing to save: no result yet")]
    NothingToSave,
    /// Index past the end of the history
    #[error("no history entry at index {0}")]
    OutOfRange(usize),
    /// Entry image could not be serialized
    #[error("failed to render history image: {0}")]
    Image(#[from] image::ImageError),
    /// History could not be serialized
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Underlying storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Native share failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The user dismissed the share dialog
    #[error("share cancelled")]
    Cancelled,
    /// Sharing is not available
    #[error("sharing is not supported")]
    Unsupported,
    /// The share target reported a failure
    #[error("share failed: {0}")]
    Failed(String),
}

/// Copy, share and download failures
#[derive(Debug, Error)]
pub enum ActionError {
    /// Clipboard provider failure
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
    /// Share target failure
    #[error(transparent)]
    Share(#[from] ShareError),
    /// Raster could not be serialized
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    /// Download could not be written
    #[error("failed to save file: {0}")]
    Io(#[from] io::Error),
}
