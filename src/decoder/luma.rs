//! Convert RGBA pixels to luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Alpha is composited over white first so transparent areas read as paper,
//! not as dark modules.

/// Coefficients for luminance conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Convert an RGBA buffer (4 bytes per pixel) into one luminance byte per pixel
pub fn rgba_to_luma(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let pixel_count = width * height;
    rgba.chunks_exact(4)
        .take(pixel_count)
        .map(|px| {
            let alpha = px[3] as u32;
            let over_white = |c: u8| (c as u32 * alpha + 255 * (255 - alpha)) / 255;
            let y = COEF_R * over_white(px[0]) + COEF_G * over_white(px[1]) + COEF_B * over_white(px[2]);
            (y >> 8).min(255) as u8
        })
        .collect()
}
