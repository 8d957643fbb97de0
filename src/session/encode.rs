use super::{AttemptCounter, AttemptId};
use crate::encoder::QrEncoder;
use crate::error::EncodeError;
use crate::models::QrStyle;
use crate::notify::Notifier;
use crate::tools::{png_bytes, png_data_url};
use image::RgbaImage;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A generated code and the input that produced it
#[derive(Debug, Clone)]
pub struct EncodeResult {
    /// Trimmed source text
    pub text: String,
    /// Style used
    pub style: QrStyle,
    /// Rendered raster, `style.width` square
    pub image: RgbaImage,
}

impl EncodeResult {
    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// PNG encoding of the raster
    pub fn to_png(&self) -> Result<Vec<u8>, image::ImageError> {
        png_bytes(&self.image)
    }

    /// PNG raster as a `data:` URL
    pub fn to_data_url(&self) -> Result<String, image::ImageError> {
        Ok(png_data_url(&self.to_png()?))
    }
}

/// Encode session state
#[derive(Debug, Clone, Default)]
pub enum EncodeState {
    /// Nothing generated yet
    #[default]
    Idle,
    /// Generation in progress
    Generating,
    /// Latest generation
    Succeeded(EncodeResult),
    /// Encoder error message
    Failed(String),
}

/// Encode session: `Idle -> Generating -> Succeeded | Failed`
pub struct EncodeSession {
    encoder: Arc<dyn QrEncoder>,
    notifier: Arc<dyn Notifier>,
    state: EncodeState,
    attempts: AttemptCounter,
}

impl EncodeSession {
    /// New idle session
    pub fn new(encoder: Arc<dyn QrEncoder>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            encoder,
            notifier,
            state: EncodeState::Idle,
            attempts: AttemptCounter::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> &EncodeState {
        &self.state
    }

    /// Latest successful generation, if the last attempt succeeded
    pub fn current(&self) -> Option<&EncodeResult> {
        match &self.state {
            EncodeState::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    /// Render `text` with `style`.
    ///
    /// Blank text is rejected before the encoder runs and leaves the state
    /// untouched.
    pub fn generate(&mut self, text: &str, style: &QrStyle) -> &EncodeState {
        let text = text.trim();
        if text.is_empty() {
            self.notifier.error("⚠️ Please enter text to generate QR code");
            return &self.state;
        }

        let attempt = self.begin();
        let result = self.encoder.encode(text, style).map(|image| EncodeResult {
            text: text.to_string(),
            style: *style,
            image,
        });
        self.finish(attempt, result);
        &self.state
    }

    /// Start an attempt and move to `Generating`
    pub fn begin(&mut self) -> AttemptId {
        self.state = EncodeState::Generating;
        self.attempts.next()
    }

    /// Record the outcome of `attempt`; superseded attempts are ignored
    pub fn finish(&mut self, attempt: AttemptId, result: Result<EncodeResult, EncodeError>) -> bool {
        if !self.attempts.is_current(attempt) {
            debug!(?attempt, "discarding superseded encode result");
            return false;
        }
        self.state = match result {
            Ok(result) => {
                info!(width = result.width(), level = %result.style.error_correction, "QR code generated");
                self.notifier.success("✅ QR Code generated successfully!");
                EncodeState::Succeeded(result)
            }
            Err(err) => {
                warn!(error = %err, "QR generation failed");
                self.notifier.error("❌ Failed to generate QR code");
                EncodeState::Failed(err.to_string())
            }
        };
        true
    }
}
