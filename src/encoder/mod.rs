//! QR image encoding
//!
//! [`QrEncoder`] turns text plus a [`QrStyle`] into an exactly `width`-square
//! RGBA raster. [`QrcodeEncoder`] builds the module matrix with the `qrcode`
//! crate and scales it nearest-neighbour so any width at least as large as
//! the module count is honoured exactly.

use crate::error::EncodeError;
use crate::models::{ErrorCorrection, QrStyle};
use image::RgbaImage;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

/// Largest raster side we agree to allocate
pub const MAX_WIDTH: u32 = 4096;

/// Renders text as a QR code raster
pub trait QrEncoder: Send + Sync {
    /// Encode `text` using `style`; the raster is `style.width` on each side
    fn encode(&self, text: &str, style: &QrStyle) -> Result<RgbaImage, EncodeError>;
}

impl From<ErrorCorrection> for EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Encoder backed by the `qrcode` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl QrcodeEncoder {
    /// Create an encoder
    pub fn new() -> Self {
        Self
    }
}

impl QrEncoder for QrcodeEncoder {
    fn encode(&self, text: &str, style: &QrStyle) -> Result<RgbaImage, EncodeError> {
        if style.width > MAX_WIDTH {
            return Err(EncodeError::WidthTooLarge {
                width: style.width,
                max: MAX_WIDTH,
            });
        }

        let code = QrCode::with_error_correction_level(text.as_bytes(), style.error_correction.into())
            .map_err(|err| EncodeError::Capacity(err.to_string()))?;
        let modules = code.width() as u32;
        let margin = style.margin;
        let total = margin
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(modules))
            .ok_or(EncodeError::MarginTooLarge { margin })?;
        if style.width < total {
            return Err(EncodeError::WidthTooSmall {
                width: style.width,
                required: total,
            });
        }

        let colors = code.to_colors();
        let dark = style.foreground.to_rgba();
        let light = style.background.to_rgba();
        let width = style.width;

        debug!(modules, margin, width, level = %style.error_correction, "rendering QR code");

        // Each output pixel samples the module under it: module = px * total / width
        let image = RgbaImage::from_fn(width, width, |x, y| {
            let mx = (x as u64 * total as u64 / width as u64) as u32;
            let my = (y as u64 * total as u64 / width as u64) as u32;
            let inside = (margin..margin + modules).contains(&mx) && (margin..margin + modules).contains(&my);
            if !inside {
                return light;
            }
            let idx = ((my - margin) * modules + (mx - margin)) as usize;
            match colors[idx] {
                qrcode::Color::Dark => dark,
                qrcode::Color::Light => light,
            }
        });
        Ok(image)
    }
}
