use std::io::Cursor;

use image::{Rgba, RgbaImage};
use raqote::{DrawOptions, DrawTarget, ExtendMode, FilterMode, Image, Source, Transform};

use super::{buffer_len, Backend};
use crate::{BenchError, TileRect};

const NAME: &str = "Raqote";

/// Pure Rust 2D library drawing into premultiplied `0xAARRGGBB` targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct RaqoteBackend;

/// Decoded image in raqote's premultiplied ARGB layout.
#[derive(Clone, Debug)]
pub struct RaqoteImage {
    width: i32,
    height: i32,
    data: Vec<u32>,
}

impl RaqoteImage {
    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    fn as_image(&self) -> Image<'_> {
        Image {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

#[inline]
fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let a32 = u32::from(a);
    let mul = |c: u8| (u32::from(c) * a32 + 127) / 255;
    (a32 << 24) | (mul(r) << 16) | (mul(g) << 8) | mul(b)
}

#[inline]
fn demultiply(pixel: u32) -> [u8; 4] {
    let a = (pixel >> 24) & 0xFF;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let div = |c: u32| (((c & 0xFF) * 255 + a / 2) / a).min(255) as u8;
    [div(pixel >> 16), div(pixel >> 8), div(pixel), a as u8]
}

fn decode_error(e: impl std::fmt::Display) -> BenchError {
    BenchError::Decode {
        provider: NAME,
        message: e.to_string(),
    }
}

impl Backend for RaqoteBackend {
    type Image = RaqoteImage;
    type Canvas = DrawTarget;

    fn name(&self) -> &'static str {
        NAME
    }

    fn load_image(&self, bytes: &[u8]) -> Result<RaqoteImage, BenchError> {
        let mut decoder = png::Decoder::new(Cursor::new(bytes));
        decoder
            .set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(decode_error)?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(decode_error)?;
        let pixels = &buf[..info.buffer_size()];

        let data: Vec<u32> = match info.color_type {
            png::ColorType::Rgba => pixels
                .chunks_exact(4)
                .map(|p| premultiply(p[0], p[1], p[2], p[3]))
                .collect(),
            png::ColorType::Rgb => pixels
                .chunks_exact(3)
                .map(|p| premultiply(p[0], p[1], p[2], 255))
                .collect(),
            png::ColorType::GrayscaleAlpha => pixels
                .chunks_exact(2)
                .map(|p| premultiply(p[0], p[0], p[0], p[1]))
                .collect(),
            png::ColorType::Grayscale => pixels
                .iter()
                .map(|&v| premultiply(v, v, v, 255))
                .collect(),
            png::ColorType::Indexed => return Err(decode_error("palette was not expanded")),
        };

        let width = i32::try_from(info.width).map_err(decode_error)?;
        let height = i32::try_from(info.height).map_err(decode_error)?;
        Ok(RaqoteImage {
            width,
            height,
            data,
        })
    }

    fn create_canvas(&self, width: u32, height: u32) -> Result<DrawTarget, BenchError> {
        let size_error = || BenchError::CanvasSize {
            provider: NAME,
            width,
            height,
        };
        if width == 0 || height == 0 || buffer_len(width, height, 4).is_none() {
            return Err(size_error());
        }
        let w = i32::try_from(width).map_err(|_| size_error())?;
        let h = i32::try_from(height).map_err(|_| size_error())?;
        Ok(DrawTarget::new(w, h))
    }

    fn draw_image(
        &self,
        canvas: &mut DrawTarget,
        image: &RaqoteImage,
        src: TileRect,
        dst: TileRect,
    ) -> Result<(), BenchError> {
        let Some((src, dst)) = src.clip_source(dst, image.width(), image.height()) else {
            return Ok(());
        };

        // Source transforms map canvas coordinates back into the image.
        let scale_x = src.width as f32 / dst.width as f32;
        let scale_y = src.height as f32 / dst.height as f32;
        let to_image = Transform::new(
            scale_x,
            0.0,
            0.0,
            scale_y,
            src.x as f32 - dst.x as f32 * scale_x,
            src.y as f32 - dst.y as f32 * scale_y,
        );
        let source = Source::Image(
            image.as_image(),
            ExtendMode::Pad,
            FilterMode::Nearest,
            to_image,
        );

        canvas.fill_rect(
            dst.x as f32,
            dst.y as f32,
            dst.width as f32,
            dst.height as f32,
            &source,
            &DrawOptions::new(),
        );
        Ok(())
    }

    fn snapshot(&self, canvas: &DrawTarget) -> RgbaImage {
        let mut out = RgbaImage::new(canvas.width() as u32, canvas.height() as u32);
        for (dst, &src) in out.pixels_mut().zip(canvas.get_data()) {
            *dst = Rgba(demultiply(src));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(image: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_premultiply_roundtrip_opaque() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let pixel = premultiply(v, 255 - v, v / 2, 255);
            assert_eq!(demultiply(pixel), [v, 255 - v, v / 2, 255]);
        }
    }

    #[test]
    fn test_premultiply_transparent_is_zero() {
        assert_eq!(premultiply(200, 100, 50, 0), 0);
        assert_eq!(demultiply(0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_load_png_dimensions() {
        let image = RgbaImage::from_pixel(7, 3, Rgba([1, 2, 3, 255]));
        let loaded = RaqoteBackend.load_image(&encode_png(&image)).unwrap();
        assert_eq!(loaded.width(), 7);
        assert_eq!(loaded.height(), 3);
        assert_eq!(demultiply(loaded.data[0]), [1, 2, 3, 255]);
    }

    #[test]
    fn test_draw_copies_only_the_tile() {
        let source = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 255, 255]));
        let image = RaqoteBackend.load_image(&encode_png(&source)).unwrap();
        let mut canvas = RaqoteBackend.create_canvas(20, 20).unwrap();

        let tile = TileRect::new(0, 10, 10, 10);
        RaqoteBackend
            .draw_image(&mut canvas, &image, tile, tile)
            .unwrap();

        let snapshot = RaqoteBackend.snapshot(&canvas);
        assert_eq!(snapshot.get_pixel(5, 15).0, [0, 0, 255, 255]);
        assert_eq!(snapshot.get_pixel(5, 5).0[3], 0);
        assert_eq!(snapshot.get_pixel(15, 15).0[3], 0);
    }

    #[test]
    fn test_zero_sized_canvas_rejected() {
        assert!(RaqoteBackend.create_canvas(10, 0).is_err());
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        assert!(matches!(
            RaqoteBackend.create_canvas(3_000_000_000, 3_000_000_000),
            Err(BenchError::CanvasSize { .. })
        ));
    }
}
