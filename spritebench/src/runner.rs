//! The timed tile-drawing loop.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::{tile_grid, Backend, BenchConfig, BenchError, Provider, Samples};

/// Result of benchmarking one provider.
#[derive(Clone, Debug)]
pub struct ProviderReport {
    pub provider: &'static str,
    pub samples: Samples,
    /// Total `draw_image` calls across all samples.
    pub draw_calls: usize,
    /// JPEG written after the last sample.
    pub output: PathBuf,
}

impl fmt::Display for ProviderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Average: {:.2} ms, Min: {:.2} ms, Max: {:.2} ms",
            self.provider,
            self.samples.average(),
            self.samples.min(),
            self.samples.max()
        )
    }
}

/// Hooks called while a run progresses. Never called inside a timed pass.
pub trait RunObserver {
    fn provider_started(&mut self, _provider: &'static str, _samples: usize) {}

    fn sample_finished(&mut self, _provider: &'static str, _index: usize, _elapsed_ms: f64) {}

    fn provider_finished(&mut self, _report: &ProviderReport) {}
}

impl RunObserver for () {}

/// Benchmarks a single backend.
///
/// Reads and decodes the spritesheet, then draws the tile grid onto one
/// canvas `config.samples` times, timing every pass. After the last pass the
/// canvas is saved to `output`.
///
/// # Errors
/// Fails on an invalid config or on any read, decode, draw or save failure.
/// Nothing is written to `output` unless every pass succeeded.
pub fn run_provider<B: Backend>(
    backend: &B,
    config: &BenchConfig,
    output: &Path,
    observer: &mut dyn RunObserver,
) -> Result<ProviderReport, BenchError> {
    config.validate()?;
    let name = backend.name();

    let bytes = fs::read(&config.spritesheet).map_err(|source| BenchError::ReadSpritesheet {
        path: config.spritesheet.clone(),
        source,
    })?;
    let spritesheet = backend.load_image(&bytes)?;
    let size = config.canvas_size();
    let mut canvas = backend.create_canvas(size, size)?;
    let tiles: Vec<_> = tile_grid(config).collect();

    observer.provider_started(name, config.samples);

    let mut results = Vec::with_capacity(config.samples);
    let mut draw_calls = 0;
    for t in 0..config.samples {
        let start = Instant::now();
        for &(src, dst) in &tiles {
            backend.draw_image(&mut canvas, &spritesheet, src, dst)?;
            draw_calls += 1;
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(provider = name, sample = t, elapsed_ms, "sample finished");
        results.push(elapsed_ms);
        observer.sample_finished(name, t, elapsed_ms);

        if t == config.samples - 1 {
            backend.save_canvas(&canvas, output, config.jpeg_quality)?;
            info!(provider = name, output = %output.display(), "canvas saved");
        }
    }

    let samples = Samples::new(results)
        .ok_or_else(|| BenchError::InvalidConfig("no samples were collected".into()))?;
    let report = ProviderReport {
        provider: name,
        samples,
        draw_calls,
        output: output.to_path_buf(),
    };
    observer.provider_finished(&report);
    Ok(report)
}

/// Benchmarks `providers` one after another.
///
/// # Errors
/// Stops at the first failing provider; later providers are not run.
pub fn run_all(
    providers: &[Provider],
    config: &BenchConfig,
    observer: &mut dyn RunObserver,
) -> Result<Vec<ProviderReport>, BenchError> {
    config.validate()?;
    info!(
        spritesheet = %config.spritesheet.display(),
        providers = providers.len(),
        grid = config.sprite_count,
        tile = config.sprite_size,
        samples = config.samples,
        "starting benchmark"
    );

    let mut reports = Vec::with_capacity(providers.len());
    for provider in providers {
        reports.push(provider.run(config, &mut *observer)?);
    }
    Ok(reports)
}
