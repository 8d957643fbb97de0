//! Shared fakes for integration tests
#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use qr_studio::actions::{Clipboard, ResultActions, ShareSheet, SharedFile};
use qr_studio::actions::Downloads;
use qr_studio::camera::{CameraBackend, FacingMode};
use qr_studio::error::{ActionError, CameraError, ShareError};
use qr_studio::models::outcome::{NO_TEXT_PLACEHOLDER, SCANNING_PLACEHOLDER};
use qr_studio::notify::RecordingNotifier;
use qr_studio::{DecodeFailure, QrStyle, encode_text};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Every failure a decode attempt can end in
pub fn all_failures() -> Vec<DecodeFailure> {
    let failures = vec![
        DecodeFailure::NotFound,
        DecodeFailure::PermissionDenied,
        DecodeFailure::DeviceMissing,
        DecodeFailure::InsecureContext,
        DecodeFailure::Unsupported,
        DecodeFailure::Other("boom".into()),
    ];
    // Exhaustive so a new variant cannot be left out of the list silently
    for failure in &failures {
        match failure {
            DecodeFailure::NotFound
            | DecodeFailure::PermissionDenied
            | DecodeFailure::DeviceMissing
            | DecodeFailure::InsecureContext
            | DecodeFailure::Unsupported
            | DecodeFailure::Other(_) => {}
        }
    }
    failures
}

/// Every status text the result area can show instead of a decoded result
pub fn all_markers() -> Vec<String> {
    let mut markers = vec![
        NO_TEXT_PLACEHOLDER.to_string(),
        SCANNING_PLACEHOLDER.to_string(),
    ];
    markers.extend(all_failures().iter().map(DecodeFailure::marker));
    markers
}

/// A QR code for `text` with a quiet zone wide enough for reliable decoding
pub fn qr_image(text: &str, width: u32) -> RgbaImage {
    let style = QrStyle {
        width,
        margin: 4,
        ..QrStyle::default()
    };
    encode_text(text, &style).expect("encode test code")
}

/// `inner` pasted in the middle of a white `width` x `height` frame
pub fn framed(inner: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut frame = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    let x = (width - inner.width()) / 2;
    let y = (height - inner.height()) / 2;
    image::imageops::overlay(&mut frame, inner, i64::from(x), i64::from(y));
    frame
}

/// A white frame with nothing to decode
pub fn blank_frame(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
}

/// PNG bytes of `image`
pub fn png(image: &RgbaImage) -> Vec<u8> {
    qr_studio::tools::png_bytes(image).expect("png encode")
}

/// Clipboard that remembers what was written
#[derive(Clone, Default)]
pub struct FakeClipboard {
    pub writes: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl FakeClipboard {
    pub fn written(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Clipboard for FakeClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ActionError> {
        if self.fail {
            return Err(ActionError::Clipboard("denied".into()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// How the fake share sheet responds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    Unsupported,
    TextOnly,
    Accept,
    Cancel,
    Fail,
}

/// Share sheet with a scripted response
#[derive(Clone)]
pub struct FakeShare {
    pub mode: ShareMode,
    pub texts: Arc<Mutex<Vec<String>>>,
    pub files: Arc<Mutex<Vec<SharedFile>>>,
}

impl FakeShare {
    pub fn new(mode: ShareMode) -> Self {
        Self {
            mode,
            texts: Arc::default(),
            files: Arc::default(),
        }
    }
}

impl ShareSheet for FakeShare {
    fn supports_text(&self) -> bool {
        self.mode != ShareMode::Unsupported
    }

    fn supports_file(&self, _file: &SharedFile) -> bool {
        !matches!(self.mode, ShareMode::Unsupported | ShareMode::TextOnly)
    }

    fn share_text(&mut self, text: &str) -> Result<(), ShareError> {
        self.texts.lock().unwrap().push(text.to_string());
        self.respond()
    }

    fn share_file(&mut self, file: &SharedFile) -> Result<(), ShareError> {
        self.files.lock().unwrap().push(file.clone());
        self.respond()
    }
}

impl FakeShare {
    fn respond(&self) -> Result<(), ShareError> {
        match self.mode {
            ShareMode::Unsupported => Err(ShareError::Unsupported),
            ShareMode::TextOnly | ShareMode::Accept => Ok(()),
            ShareMode::Cancel => Err(ShareError::Cancelled),
            ShareMode::Fail => Err(ShareError::Failed("sheet crashed".into())),
        }
    }
}

/// Result actions over fakes, downloading into `dir`
pub fn fake_actions(
    clipboard: &FakeClipboard,
    share: &FakeShare,
    dir: &Path,
    notifier: &Arc<RecordingNotifier>,
) -> ResultActions {
    ResultActions::new(
        Box::new(clipboard.clone()),
        Box::new(share.clone()),
        Downloads::new(dir),
        notifier.clone(),
    )
}

/// Counters shared between a [`FakeCamera`] and the test
#[derive(Debug, Default)]
pub struct CameraCounters {
    pub acquired: AtomicUsize,
    pub captured: AtomicUsize,
    pub released: AtomicUsize,
}

impl CameraCounters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn captured(&self) -> usize {
        self.captured.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

/// Camera serving scripted frames
pub struct FakeCamera {
    pub frames: VecDeque<RgbaImage>,
    pub acquire_error: Option<CameraError>,
    pub release_error: Option<CameraError>,
    /// Keep returning blank frames after the script runs out
    pub endless: bool,
    pub counters: Arc<CameraCounters>,
}

impl FakeCamera {
    pub fn new(frames: Vec<RgbaImage>) -> (Self, Arc<CameraCounters>) {
        let counters = Arc::new(CameraCounters::default());
        let camera = Self {
            frames: frames.into(),
            acquire_error: None,
            release_error: None,
            endless: false,
            counters: counters.clone(),
        };
        (camera, counters)
    }
}

impl CameraBackend for FakeCamera {
    fn acquire(&mut self, _facing: FacingMode) -> Result<(), CameraError> {
        if let Some(err) = self.acquire_error.clone() {
            return Err(err);
        }
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn capture(&mut self) -> Result<Option<RgbaImage>, CameraError> {
        self.counters.captured.fetch_add(1, Ordering::SeqCst);
        match self.frames.pop_front() {
            Some(frame) => Ok(Some(frame)),
            None if self.endless => Ok(Some(blank_frame(320, 240))),
            None => Ok(None),
        }
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
        match self.release_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
