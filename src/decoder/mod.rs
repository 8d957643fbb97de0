//! QR image decoding
//!
//! The session layer only sees [`ImageDecoder`]: a full RGBA buffer in,
//! decoded text or nothing out. [`RqrrDecoder`] is the default backend.

pub mod luma;

use image::RgbaImage;
use tracing::debug;

use luma::rgba_to_luma;

/// Extracts text from a raster image
pub trait ImageDecoder: Send + Sync {
    /// Decode the first readable QR code in `image`, or `None` on no match
    fn decode(&self, image: &RgbaImage) -> Option<String>;
}

impl<F> ImageDecoder for F
where
    F: Fn(&RgbaImage) -> Option<String> + Send + Sync,
{
    fn decode(&self, image: &RgbaImage) -> Option<String> {
        self(image)
    }
}

/// Decoder backed by `rqrr` grid detection
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RqrrDecoder {
    fn decode(&self, image: &RgbaImage) -> Option<String> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        if width == 0 || height == 0 {
            return None;
        }

        let luma = rgba_to_luma(image.as_raw(), width, height);
        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| luma[y * width + x]);
        let grids = prepared.detect_grids();
        debug!(width, height, grids = grids.len(), "grid detection finished");

        for (idx, grid) in grids.iter().enumerate() {
            match grid.decode() {
                Ok((_meta, content)) => {
                    debug!(grid = idx, bytes = content.len(), "grid decoded");
                    return Some(content);
                }
                Err(err) => debug!(grid = idx, error = ?err, "grid failed to decode"),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_image_has_no_code() {
        let image = RgbaImage::from_pixel(64, 64, image::Rgba([255, 255, 255, 255]));
        assert_eq!(RqrrDecoder::new().decode(&image), None);
    }

    #[test]
    fn empty_image_has_no_code() {
        let image = RgbaImage::new(0, 0);
        assert_eq!(RqrrDecoder::new().decode(&image), None);
    }

    #[test]
    fn closures_act_as_decoders() {
        let decoder = |_: &RgbaImage| Some("fixed".to_string());
        let image = RgbaImage::new(1, 1);
        assert_eq!(decoder.decode(&image).as_deref(), Some("fixed"));
    }
}
