use crate::error::CameraError;

/// Shown in the result area before anything has been decoded
pub const NO_TEXT_PLACEHOLDER: &str = "No text extracted yet.";

/// Shown while an attempt is in flight
pub const SCANNING_PLACEHOLDER: &str = "No text yet, scanning...";

/// Prefixes that mark displayed text as a status message rather than a result
const RESERVED_PREFIXES: [&str; 3] = ["No text", "❌", "⚠"];

/// True when `text` starts with one of the reserved status markers
pub fn is_reserved_marker(text: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| text.starts_with(prefix))
}

/// True when `text` is a real result that copy/share/history may act on
pub fn is_actionable(text: &str) -> bool {
    !text.trim().is_empty() && !is_reserved_marker(text)
}

/// Why a decode attempt produced no text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeFailure {
    /// The decoder found no QR code
    NotFound,
    /// Camera access was refused
    PermissionDenied,
    /// No camera device exists
    DeviceMissing,
    /// Camera requires a secure context
    InsecureContext,
    /// Camera capture is unavailable here
    Unsupported,
    /// Anything else, with a human-readable message
    Other(String),
}

impl DecodeFailure {
    /// Marker string rendered in the result area
    pub fn marker(&self) -> String {
        match self {
            DecodeFailure::NotFound => "❌ No QR code found in image.".to_string(),
            DecodeFailure::PermissionDenied => {
                "⚠ Camera not accessible. Please allow permissions.".to_string()
            }
            DecodeFailure::DeviceMissing => "⚠ No camera found on this device.".to_string(),
            DecodeFailure::InsecureContext => "⚠ Camera requires a secure context.".to_string(),
            DecodeFailure::Unsupported => "⚠ Camera is not supported here.".to_string(),
            DecodeFailure::Other(message) => format!("❌ {message}"),
        }
    }
}

impl From<CameraError> for DecodeFailure {
    fn from(err: CameraError) -> Self {
        match err {
            CameraError::PermissionDenied => DecodeFailure::PermissionDenied,
            CameraError::DeviceMissing => DecodeFailure::DeviceMissing,
            CameraError::InsecureContext => DecodeFailure::InsecureContext,
            CameraError::Unsupported => DecodeFailure::Unsupported,
            CameraError::Other(message) => DecodeFailure::Other(message),
        }
    }
}

/// Outcome of one decode attempt
pub type DecodeResult = Result<String, DecodeFailure>;

/// Decode session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DecodeState {
    /// Nothing in flight
    #[default]
    Idle,
    /// Upload or camera attempt in progress
    Decoding,
    /// Decoded text, verbatim
    Succeeded(String),
    /// Attempt failed
    Failed(DecodeFailure),
}

impl DecodeState {
    /// Text for the result area
    pub fn display_text(&self) -> String {
        match self {
            DecodeState::Idle => NO_TEXT_PLACEHOLDER.to_string(),
            DecodeState::Decoding => SCANNING_PLACEHOLDER.to_string(),
            DecodeState::Succeeded(text) => text.clone(),
            DecodeState::Failed(failure) => failure.marker(),
        }
    }

    /// Decoded text when the last attempt succeeded
    pub fn success_text(&self) -> Option<&str> {
        match self {
            DecodeState::Succeeded(text) => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_renders_a_reserved_marker() {
        let failures = [
            DecodeFailure::NotFound,
            DecodeFailure::PermissionDenied,
            DecodeFailure::DeviceMissing,
            DecodeFailure::InsecureContext,
            DecodeFailure::Unsupported,
            DecodeFailure::Other("boom".into()),
        ];
        for failure in failures {
            assert!(is_reserved_marker(&failure.marker()), "{failure:?}");
        }
        assert!(is_reserved_marker(&DecodeState::Idle.display_text()));
        assert!(is_reserved_marker(&DecodeState::Decoding.display_text()));
    }

    #[test]
    fn success_is_displayed_verbatim() {
        let state = DecodeState::Succeeded("  https://example.com/?q=1 ".into());
        assert_eq!(state.display_text(), "  https://example.com/?q=1 ");
        assert!(is_actionable(&state.display_text()));
    }

    #[test]
    fn blank_text_is_not_actionable() {
        assert!(!is_actionable(""));
        assert!(!is_actionable("   "));
        assert!(is_actionable("HELLO"));
    }
}
