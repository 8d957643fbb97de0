//! qr_studio - scan QR codes and generate styled ones
//!
//! Decode text from an uploaded image or a camera feed, render text as a
//! styled QR code, keep a short history of results and copy, share or
//! download the current one.
//!
//! The decoder, encoder, camera, clipboard, share sheet and storage are all
//! behind traits; the defaults use `rqrr`, `qrcode`, a frame directory,
//! `arboard` and one file per key.
//!
//! # Example
//! ```
//! use qr_studio::{QrStyle, decode_image, encode_text};
//!
//! let style = QrStyle { width: 240, margin: 4, ..QrStyle::default() };
//! let image = encode_text("HELLO", &style).unwrap();
//! assert_eq!(image.width(), 240);
//! assert_eq!(decode_image(&image).as_deref(), Some("HELLO"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Copy, share and download of the current result
pub mod actions;
/// Page composition and the explicit application context
pub mod app;
/// Camera capture backends and the scan loop
pub mod camera;
/// Environment-driven settings
pub mod config;
/// QR image decoding
pub mod decoder;
/// QR image encoding
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (history entries, styles, decode outcomes)
pub mod models;
/// Toast notifications
pub mod notify;
/// Decode and encode sessions
pub mod session;
/// Key-value persistence, history and preferences
pub mod storage;
/// Image file helpers
pub mod tools;

pub use app::{AppContext, GeneratorPage, ScannerPage};
pub use decoder::{ImageDecoder, RqrrDecoder};
pub use encoder::{QrEncoder, QrcodeEncoder};
pub use models::{
    Color, DecodeFailure, DecodeResult, DecodeState, EntryKind, ErrorCorrection, HistoryEntry,
    QrStyle,
};

use error::EncodeError;
use image::RgbaImage;

/// Decode the first QR code in `image` with the default decoder
pub fn decode_image(image: &RgbaImage) -> Option<String> {
    RqrrDecoder::new().decode(image)
}

/// Render `text` with the default encoder
pub fn encode_text(text: &str, style: &QrStyle) -> Result<RgbaImage, EncodeError> {
    QrcodeEncoder::new().encode(text, style)
}
