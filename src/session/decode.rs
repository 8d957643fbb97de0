use super::{AttemptCounter, AttemptId};
use crate::camera::{CameraBackend, CaptureHandle, ScanConfig, ScanEvent, capture};
use crate::decoder::ImageDecoder;
use crate::models::{DecodeFailure, DecodeResult, DecodeState};
use crate::notify::Notifier;
use image::RgbaImage;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An image file chosen by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name, for messages
    pub name: String,
    /// Encoded image bytes
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Upload from in-memory bytes
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an upload from disk
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Decode session: `Idle -> Decoding -> Succeeded | Failed`
pub struct DecodeSession {
    decoder: Arc<dyn ImageDecoder>,
    notifier: Arc<dyn Notifier>,
    scan: ScanConfig,
    state: DecodeState,
    attempts: AttemptCounter,
    capture: Option<CaptureHandle>,
}

impl DecodeSession {
    /// New idle session
    pub fn new(decoder: Arc<dyn ImageDecoder>, notifier: Arc<dyn Notifier>, scan: ScanConfig) -> Self {
        Self {
            decoder,
            notifier,
            scan,
            state: DecodeState::Idle,
            attempts: AttemptCounter::default(),
            capture: None,
        }
    }

    /// Current state
    pub fn state(&self) -> &DecodeState {
        &self.state
    }

    /// Whether a capture session is active
    pub fn is_camera_open(&self) -> bool {
        self.capture.is_some()
    }

    /// Start an attempt and move to `Decoding`
    pub fn begin(&mut self) -> AttemptId {
        self.state = DecodeState::Decoding;
        self.attempts.next()
    }

    /// Record the outcome of `attempt`.
    ///
    /// Returns `false` and changes nothing when a newer attempt has started.
    pub fn finish(&mut self, attempt: AttemptId, result: DecodeResult) -> bool {
        if !self.attempts.is_current(attempt) {
            debug!(?attempt, "discarding superseded decode result");
            return false;
        }
        self.state = match result {
            Ok(text) => {
                info!(chars = text.chars().count(), "QR code decoded");
                self.notifier.success("✅ QR code decoded!");
                DecodeState::Succeeded(text)
            }
            Err(failure) => {
                info!(?failure, "decode failed");
                self.notifier.error(&failure.marker());
                DecodeState::Failed(failure)
            }
        };
        true
    }

    /// Decode a full-resolution RGBA buffer
    pub fn decode_pixels(&self, image: &RgbaImage) -> DecodeResult {
        self.decoder.decode(image).ok_or(DecodeFailure::NotFound)
    }

    /// Decode an uploaded image. `None` means no file was chosen.
    ///
    /// Starting an upload closes any open camera.
    pub async fn decode_upload(&mut self, upload: Option<Upload>) -> &DecodeState {
        let Some(upload) = upload else {
            self.notifier.error("⚠️ Please choose an image first");
            return &self.state;
        };

        self.teardown_capture().await;
        let attempt = self.begin();
        let decoder = Arc::clone(&self.decoder);
        let result = tokio::task::spawn_blocking(move || decode_bytes(decoder.as_ref(), &upload))
            .await
            .unwrap_or_else(|err| Err(DecodeFailure::Other(format!("decode task failed: {err}"))));
        self.finish(attempt, result);
        &self.state
    }

    /// Open the camera and start scanning.
    ///
    /// On acquisition failure the state becomes `Failed` with the classified
    /// cause and no capture session is kept.
    pub async fn open_camera<B: CameraBackend>(&mut self, backend: B) -> &DecodeState {
        self.teardown_capture().await;
        let attempt = self.begin();
        match capture::start(backend, self.scan, Arc::clone(&self.decoder)) {
            Ok(handle) => {
                self.capture = Some(handle);
                self.notifier.info("📷 Camera started. Point it at a QR code.");
            }
            Err(err) => {
                warn!(error = %err, "camera acquisition failed");
                self.finish(attempt, Err(err.into()));
            }
        }
        &self.state
    }

    /// Wait for the open camera to produce its single result.
    ///
    /// The capture session is torn down before the state changes. Without an
    /// open camera this returns the current state.
    pub async fn await_camera(&mut self) -> &DecodeState {
        let attempt = self.attempts.current();
        let event = match self.capture.as_mut() {
            Some(handle) => handle.first_result().await,
            None => return &self.state,
        };
        self.teardown_capture().await;

        let result = match event {
            ScanEvent::Decoded(text) => Ok(text),
            ScanEvent::Ended => Err(DecodeFailure::NotFound),
            ScanEvent::Failed(err) => Err(err.into()),
            ScanEvent::Stopped => {
                self.state = DecodeState::Idle;
                return &self.state;
            }
        };
        self.finish(attempt, result);
        &self.state
    }

    /// Close the camera and return to `Idle`.
    ///
    /// Teardown failures are logged, never reported as failures.
    pub async fn close_camera(&mut self) -> &DecodeState {
        let was_open = self.capture.is_some();
        self.teardown_capture().await;
        // Anything still in flight is stale now
        self.attempts.next();
        self.state = DecodeState::Idle;
        if was_open {
            self.notifier.info("Camera closed.");
        }
        &self.state
    }

    async fn teardown_capture(&mut self) {
        if let Some(handle) = self.capture.take() {
            if let Err(err) = handle.stop().await {
                warn!(error = %err, "camera stop failed");
            }
        }
    }
}

fn decode_bytes(decoder: &dyn ImageDecoder, upload: &Upload) -> DecodeResult {
    match image::load_from_memory(&upload.bytes) {
        Ok(image) => {
            let rgba = image.to_rgba8();
            debug!(name = %upload.name, width = rgba.width(), height = rgba.height(), "decoding upload");
            decoder.decode(&rgba).ok_or(DecodeFailure::NotFound)
        }
        Err(err) => {
            warn!(name = %upload.name, error = %err, "upload is not a readable image");
            Err(DecodeFailure::Other(format!(
                "Could not read image {}: {}",
                upload.name, err
            )))
        }
    }
}
