use image::{Rgba, RgbaImage};
use tiny_skia::{
    BlendMode, FilterQuality, Paint, Pattern, Pixmap, Rect, SpreadMode, Transform,
};

use super::Backend;
use crate::{BenchError, TileRect};

const NAME: &str = "Tiny Skia";

/// Software Skia port: premultiplied RGBA pixmaps drawn through shaders.
#[derive(Clone, Copy, Debug, Default)]
pub struct TinySkiaBackend;

impl Backend for TinySkiaBackend {
    type Image = Pixmap;
    type Canvas = Pixmap;

    fn name(&self) -> &'static str {
        NAME
    }

    fn load_image(&self, bytes: &[u8]) -> Result<Pixmap, BenchError> {
        Pixmap::decode_png(bytes).map_err(|e| BenchError::Decode {
            provider: NAME,
            message: e.to_string(),
        })
    }

    fn create_canvas(&self, width: u32, height: u32) -> Result<Pixmap, BenchError> {
        Pixmap::new(width, height).ok_or(BenchError::CanvasSize {
            provider: NAME,
            width,
            height,
        })
    }

    fn draw_image(
        &self,
        canvas: &mut Pixmap,
        image: &Pixmap,
        src: TileRect,
        dst: TileRect,
    ) -> Result<(), BenchError> {
        let Some((src, dst)) = src.clip_source(dst, image.width(), image.height()) else {
            return Ok(());
        };

        let scale_x = dst.width as f32 / src.width as f32;
        let scale_y = dst.height as f32 / src.height as f32;
        // Maps image space onto the canvas so that `src` lands on `dst`.
        let placement = Transform::from_row(
            scale_x,
            0.0,
            0.0,
            scale_y,
            dst.x as f32 - src.x as f32 * scale_x,
            dst.y as f32 - src.y as f32 * scale_y,
        );

        let paint = Paint {
            shader: Pattern::new(
                image.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                placement,
            ),
            blend_mode: BlendMode::SourceOver,
            anti_alias: false,
            ..Paint::default()
        };

        let rect = Rect::from_xywh(
            dst.x as f32,
            dst.y as f32,
            dst.width as f32,
            dst.height as f32,
        )
        .ok_or_else(|| BenchError::Draw {
            provider: NAME,
            message: format!("invalid destination rectangle {:?}", dst),
        })?;

        canvas.fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }

    fn snapshot(&self, canvas: &Pixmap) -> RgbaImage {
        let mut out = RgbaImage::new(canvas.width(), canvas.height());
        for (dst, src) in out.pixels_mut().zip(canvas.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        out
    }
}
