//! JPEG output shared by all backends.
//!
//! Canvases are snapshotted as straight-alpha RGBA. JPEG carries no alpha, so
//! the snapshot is composited over opaque black first, which is what the
//! canvas libraries do when asked for a JPEG.

use std::fs;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};

use crate::BenchError;

/// Composites a straight-alpha image over black.
pub fn flatten_over_black(image: &RgbaImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut out = RgbImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        let a = u16::from(a);
        let scale = |c: u8| ((u16::from(c) * a + 127) / 255) as u8;
        *dst = Rgb([scale(r), scale(g), scale(b)]);
    }
    out
}

/// Encodes a snapshot as JPEG at the given quality (1-100).
///
/// # Errors
/// Returns [`BenchError::Encode`] if the encoder rejects the image.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, BenchError> {
    let rgb = flatten_over_black(image);
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&rgb)?;
    Ok(bytes)
}

/// Encodes a snapshot and writes it to `path`, replacing any existing file.
///
/// The file is only touched once encoding has succeeded.
pub fn write_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<(), BenchError> {
    let bytes = encode_jpeg(image, quality)?;
    fs::write(path, bytes).map_err(|source| BenchError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_flatten_opaque_is_identity() {
        let image = RgbaImage::from_pixel(3, 2, Rgba([200, 100, 50, 255]));
        let flat = flatten_over_black(&image);
        assert!(flat.pixels().all(|p| p.0 == [200, 100, 50]));
    }

    #[test]
    fn test_flatten_transparent_is_black() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 0]));
        let flat = flatten_over_black(&image);
        assert!(flat.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_flatten_half_alpha() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 100, 128]));
        let flat = flatten_over_black(&image);
        assert_eq!(flat.get_pixel(0, 0).0, [128, 0, 50]);
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg() {
        let image = RgbaImage::from_pixel(16, 16, Rgba([10, 20, 30, 255]));
        let bytes = encode_jpeg(&image, 90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }
}
