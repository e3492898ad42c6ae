//! Sprite blitting benchmark for 2D drawing libraries.
//!
//! Every registered [`Provider`] decodes the same spritesheet, draws it onto a
//! fresh canvas as a grid of tiles a fixed number of times, and saves the
//! final canvas as a JPEG. Each pass over the grid is timed and summarized as
//! a [`ProviderReport`].
//!
//! # Example
//!
//! ```no_run
//! use spritebench::{run_all, BenchConfig, Provider};
//!
//! let config = BenchConfig::default();
//! let reports = run_all(&Provider::ALL, &config, &mut ()).unwrap();
//! for report in reports {
//!     println!("{}", report);
//! }
//! ```

mod backend;
mod config;
mod encode;
mod error;
mod runner;
mod stats;
mod tile;

pub use backend::{
    Backend, ImageBackend, ParseProviderError, Provider, RaqoteBackend, RaqoteImage,
    TinySkiaBackend,
};
pub use config::BenchConfig;
pub use encode::{encode_jpeg, flatten_over_black, write_jpeg};
pub use error::BenchError;
pub use runner::{run_all, run_provider, ProviderReport, RunObserver};
pub use stats::Samples;
pub use tile::{tile_grid, TileRect};

/// Spritesheet read when no other path is configured.
pub const SPRITESHEET_PATH: &str = "./spritesheet.png";
/// Number of tiles along each axis of the grid.
pub const SPRITE_COUNT: u32 = 20;
/// Edge length of a single tile in pixels.
pub const SPRITE_SIZE: u32 = 10;
/// Timed passes per provider.
pub const SAMPLES: usize = 5;
/// Canvas edge length for the default grid.
pub const SIZE: u32 = SPRITE_COUNT * SPRITE_SIZE;
/// JPEG quality used when saving canvases.
pub const JPEG_QUALITY: u8 = 90;
