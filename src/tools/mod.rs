//! Image file helpers shared by the sessions, the frame-directory camera and the CLI

use crate::decoder::ImageDecoder;
use crate::models::{DecodeFailure, DecodeResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Load an image file as RGBA at its native resolution.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Serialize a raster as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Wrap PNG bytes as a self-contained `data:` URL.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Placeholder thumbnail stored with scanned history entries.
pub fn placeholder_data_url() -> Result<String, image::ImageError> {
    const SIDE: u32 = 48;
    const BORDER: u32 = 4;
    let frame = Rgba([0x33, 0x33, 0x33, 0xff]);
    let fill = Rgba([0xee, 0xee, 0xee, 0xff]);
    let image = RgbaImage::from_fn(SIDE, SIDE, |x, y| {
        let edge = x < BORDER || y < BORDER || x >= SIDE - BORDER || y >= SIDE - BORDER;
        if edge { frame } else { fill }
    });
    Ok(png_data_url(&png_bytes(&image)?))
}

/// Decode many image files in parallel.
///
/// Unreadable files report [`DecodeFailure::Other`]; results keep input order.
pub fn decode_batch(paths: &[PathBuf], decoder: &dyn ImageDecoder) -> Vec<(PathBuf, DecodeResult)> {
    paths
        .par_iter()
        .map(|path| {
            let result = match load_rgba(path) {
                Ok(image) => decoder.decode(&image).ok_or(DecodeFailure::NotFound),
                Err(err) => Err(DecodeFailure::Other(format!(
                    "Could not read image {}: {}",
                    path.display(),
                    err
                ))),
            };
            (path.clone(), result)
        })
        .collect()
}

/// Collect image files under `root`, sorted by path.
pub fn collect_images(root: &Path) -> Vec<PathBuf> {
    let mut stack = vec![root.to_path_buf()];
    let mut images = Vec::new();

    while let Some(dir) = stack.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if is_image_path(&path) {
                images.push(path);
            }
        }
    }

    images.sort();
    images
}

fn is_image_path(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "bmp")
        }
        None => false,
    }
}
