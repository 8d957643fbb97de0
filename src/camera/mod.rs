//! Camera capture
//!
//! A [`CameraBackend`] hands out frames; [`capture::start`] acquires it and
//! runs the scan loop as a tokio task that stops at the first decoded frame.

pub mod capture;
pub mod frames;

use crate::error::CameraError;
use image::RgbaImage;
use std::time::Duration;

pub use capture::{CaptureHandle, ScanEvent};
pub use frames::FrameDirectoryCamera;

/// Preferred camera direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Back camera
    #[default]
    Environment,
    /// Front camera
    User,
}

/// Central detection region, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanBox {
    /// Region width
    pub width: u32,
    /// Region height
    pub height: u32,
}

impl ScanBox {
    /// Square region
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Cut the centered region out of `frame`, clamped to the frame size
    pub fn crop(&self, frame: &RgbaImage) -> RgbaImage {
        let (fw, fh) = frame.dimensions();
        let w = self.width.min(fw);
        let h = self.height.min(fh);
        let x = (fw - w) / 2;
        let y = (fh - h) / 2;
        image::imageops::crop_imm(frame, x, y, w, h).to_image()
    }
}

/// Camera scan parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Device preference
    pub facing: FacingMode,
    /// Frames scanned per second
    pub fps: u32,
    /// Detection region
    pub scan_box: ScanBox,
}

impl ScanConfig {
    /// Delay between scanned frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            facing: FacingMode::Environment,
            fps: 10,
            scan_box: ScanBox::square(250),
        }
    }
}

/// A source of camera frames
pub trait CameraBackend: Send + 'static {
    /// Open the device. Failures are classified by [`CameraError`] variant.
    fn acquire(&mut self, facing: FacingMode) -> Result<(), CameraError>;

    /// Next frame, or `None` once the stream has ended
    fn capture(&mut self) -> Result<Option<RgbaImage>, CameraError>;

    /// Release the device
    fn release(&mut self) -> Result<(), CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn crop_takes_the_center() {
        let frame = RgbaImage::from_fn(10, 10, |x, y| {
            if (3..7).contains(&x) && (3..7).contains(&y) {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let region = ScanBox::square(4).crop(&frame);
        assert_eq!(region.dimensions(), (4, 4));
        assert!(region.pixels().all(|p| *p == Rgba([0, 0, 0, 255])));
    }

    #[test]
    fn crop_clamps_to_small_frames() {
        let frame = RgbaImage::new(100, 80);
        let region = ScanBox::square(250).crop(&frame);
        assert_eq!(region.dimensions(), (100, 80));
    }

    #[test]
    fn ten_fps_is_a_hundred_millis() {
        assert_eq!(ScanConfig::default().frame_interval(), Duration::from_millis(100));
    }
}
