mod progress;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use spritebench::{
    run_all, BenchConfig, Provider, JPEG_QUALITY, SAMPLES, SPRITESHEET_PATH, SPRITE_COUNT,
    SPRITE_SIZE,
};
use tracing_subscriber::EnvFilter;

use crate::progress::ReportPrinter;

const DEFAULT_LOG_FILTER: &str = "warn";

/// Times how fast tiny-skia, raqote and image blit spritesheet tiles
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Spritesheet PNG to draw from
    #[arg(long, default_value = SPRITESHEET_PATH)]
    spritesheet: PathBuf,

    /// Tiles along each axis of the grid
    #[arg(long, default_value_t = SPRITE_COUNT)]
    sprite_count: u32,

    /// Tile edge length in pixels
    #[arg(long, default_value_t = SPRITE_SIZE)]
    sprite_size: u32,

    /// Timed passes per provider
    #[arg(long, default_value_t = SAMPLES)]
    samples: usize,

    /// Directory the JPEG outputs are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// JPEG quality (1-100)
    #[arg(long, default_value_t = JPEG_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,

    /// Providers to run, in order (tiny-skia, raqote, image). Defaults to all.
    #[arg(long = "provider")]
    providers: Vec<Provider>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn config(&self) -> BenchConfig {
        BenchConfig::default()
            .with_spritesheet(&self.spritesheet)
            .with_grid(self.sprite_count, self.sprite_size)
            .with_samples(self.samples)
            .with_output_dir(&self.output_dir)
            .with_jpeg_quality(self.quality)
    }

    fn providers(&self) -> Vec<Provider> {
        if self.providers.is_empty() {
            Provider::ALL.to_vec()
        } else {
            self.providers.clone()
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = args.config();
    config.validate().context("Invalid benchmark settings")?;
    let providers = args.providers();

    let mut printer = ReportPrinter::new(!args.no_progress);
    run_all(&providers, &config, &mut printer).context("Benchmark run failed")?;

    Ok(())
}
