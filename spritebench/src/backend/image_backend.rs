use image::imageops::{self, FilterType};
use image::{GenericImageView, RgbaImage};

use super::{buffer_len, Backend};
use crate::{BenchError, TileRect};

const NAME: &str = "Image";

/// The `image` crate: straight-alpha buffers composited with `imageops`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageBackend;

impl Backend for ImageBackend {
    type Image = RgbaImage;
    type Canvas = RgbaImage;

    fn name(&self) -> &'static str {
        NAME
    }

    fn load_image(&self, bytes: &[u8]) -> Result<RgbaImage, BenchError> {
        image::load_from_memory(bytes)
            .map(|img| img.into_rgba8())
            .map_err(|e| BenchError::Decode {
                provider: NAME,
                message: e.to_string(),
            })
    }

    fn create_canvas(&self, width: u32, height: u32) -> Result<RgbaImage, BenchError> {
        let len = match buffer_len(width, height, 4) {
            Some(len) if len > 0 => len,
            _ => {
                return Err(BenchError::CanvasSize {
                    provider: NAME,
                    width,
                    height,
                })
            }
        };
        RgbaImage::from_raw(width, height, vec![0; len]).ok_or(BenchError::CanvasSize {
            provider: NAME,
            width,
            height,
        })
    }

    fn draw_image(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        src: TileRect,
        dst: TileRect,
    ) -> Result<(), BenchError> {
        let (width, height) = image.dimensions();
        let Some((src, dst)) = src.clip_source(dst, width, height) else {
            return Ok(());
        };

        let tile = image.view(src.x, src.y, src.width, src.height);
        let (x, y) = (i64::from(dst.x), i64::from(dst.y));
        if src.width == dst.width && src.height == dst.height {
            imageops::overlay(canvas, &*tile, x, y);
        } else {
            let scaled = imageops::resize(&*tile, dst.width, dst.height, FilterType::Nearest);
            imageops::overlay(canvas, &scaled, x, y);
        }
        Ok(())
    }

    fn snapshot(&self, canvas: &RgbaImage) -> RgbaImage {
        canvas.clone()
    }
}
