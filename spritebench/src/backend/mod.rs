mod image_backend;
mod raqote_backend;
mod tiny_skia_backend;

pub use image_backend::ImageBackend;
pub use raqote_backend::{RaqoteBackend, RaqoteImage};
pub use tiny_skia_backend::TinySkiaBackend;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::RgbaImage;

use crate::{run_provider, BenchConfig, BenchError, ProviderReport, RunObserver, TileRect};

/// A 2D drawing library under test.
///
/// A backend decodes the spritesheet into its own image type, creates blank
/// canvases, copies rectangles between them and hands the canvas pixels back
/// for saving. New canvases are fully transparent.
pub trait Backend {
    type Image;
    type Canvas;

    /// Human readable name used in reports.
    fn name(&self) -> &'static str;

    /// Decodes encoded image bytes (PNG at least) into a draw source.
    fn load_image(&self, bytes: &[u8]) -> Result<Self::Image, BenchError>;

    /// Creates a blank, fully transparent canvas.
    fn create_canvas(&self, width: u32, height: u32) -> Result<Self::Canvas, BenchError>;

    /// Draws the `src` region of `image` into the `dst` region of `canvas`
    /// with source-over compositing, scaling if the sizes differ.
    ///
    /// Parts of `src` outside the image and parts of `dst` outside the canvas
    /// are clipped.
    fn draw_image(
        &self,
        canvas: &mut Self::Canvas,
        image: &Self::Image,
        src: TileRect,
        dst: TileRect,
    ) -> Result<(), BenchError>;

    /// Copies the canvas out as straight-alpha RGBA.
    fn snapshot(&self, canvas: &Self::Canvas) -> RgbaImage;

    /// Persists the canvas as a JPEG file at `path`.
    fn save_canvas(
        &self,
        canvas: &Self::Canvas,
        path: &Path,
        quality: u8,
    ) -> Result<(), BenchError> {
        crate::write_jpeg(&self.snapshot(canvas), path, quality)
    }
}

/// Byte length of a `width` x `height` pixel buffer, or `None` if no
/// allocation that large is possible.
pub(super) fn buffer_len(width: u32, height: u32, bytes_per_pixel: usize) -> Option<usize> {
    let len = usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?
        .checked_mul(bytes_per_pixel)?;
    (len <= isize::MAX as usize).then_some(len)
}

/// The registry of backends, in the order they are benchmarked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    TinySkia,
    Raqote,
    Image,
}

impl Provider {
    /// Every provider in registration order.
    pub const ALL: [Provider; 3] = [Provider::TinySkia, Provider::Raqote, Provider::Image];

    pub fn name(self) -> &'static str {
        match self {
            Provider::TinySkia => TinySkiaBackend.name(),
            Provider::Raqote => RaqoteBackend.name(),
            Provider::Image => ImageBackend.name(),
        }
    }

    /// File name of the JPEG written after the last sample.
    ///
    /// The three files take the place of `skia.jpg`, `node.jpg` and
    /// `napi.jpg` written by the Node canvas bindings this benchmark mirrors:
    /// tiny-skia stands in for skia-canvas, raqote for node-canvas and image
    /// for @napi-rs/canvas.
    pub fn output_file(self) -> &'static str {
        match self {
            Provider::TinySkia => "tiny-skia.jpg",
            Provider::Raqote => "raqote.jpg",
            Provider::Image => "image.jpg",
        }
    }

    /// Benchmarks this provider's backend with `config`.
    ///
    /// # Errors
    /// Propagates any read, decode, draw or save failure of the backend.
    pub fn run(
        self,
        config: &BenchConfig,
        observer: &mut dyn RunObserver,
    ) -> Result<ProviderReport, BenchError> {
        let output = config.output_path(self.output_file());
        match self {
            Provider::TinySkia => run_provider(&TinySkiaBackend, config, &output, observer),
            Provider::Raqote => run_provider(&RaqoteBackend, config, &output, observer),
            Provider::Image => run_provider(&ImageBackend, config, &output, observer),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown provider `{0}` (expected tiny-skia, raqote or image)")]
pub struct ParseProviderError(String);

impl FromStr for Provider {
    type Err = ParseProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tiny-skia" | "tiny_skia" | "tinyskia" | "skia" => Ok(Provider::TinySkia),
            "raqote" => Ok(Provider::Raqote),
            "image" => Ok(Provider::Image),
            _ => Err(ParseProviderError(s.to_string())),
        }
    }
}
