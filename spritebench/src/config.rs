//! Run configuration.
//!
//! The defaults are the crate constants, so `BenchConfig::default()` draws a
//! 20x20 grid of 10px tiles from `./spritesheet.png` five times and writes the
//! JPEGs into the current directory.

use std::path::{Path, PathBuf};

use crate::{BenchError, JPEG_QUALITY, SAMPLES, SPRITESHEET_PATH, SPRITE_COUNT, SPRITE_SIZE};

/// Settings shared by every provider in a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    pub spritesheet: PathBuf,
    pub sprite_count: u32,
    pub sprite_size: u32,
    pub samples: usize,
    pub output_dir: PathBuf,
    pub jpeg_quality: u8,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            spritesheet: PathBuf::from(SPRITESHEET_PATH),
            sprite_count: SPRITE_COUNT,
            sprite_size: SPRITE_SIZE,
            samples: SAMPLES,
            output_dir: PathBuf::from("."),
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

impl BenchConfig {
    #[must_use]
    pub fn with_spritesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.spritesheet = path.into();
        self
    }

    #[must_use]
    pub fn with_grid(mut self, sprite_count: u32, sprite_size: u32) -> Self {
        self.sprite_count = sprite_count;
        self.sprite_size = sprite_size;
        self
    }

    #[must_use]
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Edge length of the square canvas: `sprite_count * sprite_size`.
    pub fn canvas_size(&self) -> u32 {
        self.sprite_count * self.sprite_size
    }

    /// Number of tile draws in one timed pass.
    pub fn draws_per_sample(&self) -> usize {
        self.sprite_count as usize * self.sprite_count as usize
    }

    /// Full path of an output file inside the output directory.
    pub fn output_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.output_dir.join(file_name)
    }

    /// Checks that the grid, sample count and quality are usable.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.sprite_count == 0 {
            return Err(BenchError::InvalidConfig(
                "sprite count must be at least 1".into(),
            ));
        }
        if self.sprite_size == 0 {
            return Err(BenchError::InvalidConfig(
                "sprite size must be at least 1".into(),
            ));
        }
        if self.sprite_count.checked_mul(self.sprite_size).is_none() {
            return Err(BenchError::InvalidConfig(format!(
                "a {}x{} grid of {}px tiles overflows the canvas size",
                self.sprite_count, self.sprite_count, self.sprite_size
            )));
        }
        if self.samples == 0 {
            return Err(BenchError::InvalidConfig(
                "at least one sample is required".into(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BenchError::InvalidConfig(format!(
                "JPEG quality {} is outside 1-100",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = BenchConfig::default();
        assert_eq!(config.spritesheet, PathBuf::from("./spritesheet.png"));
        assert_eq!(config.canvas_size(), 200);
        assert_eq!(config.draws_per_sample(), 400);
        assert_eq!(config.samples, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        let base = BenchConfig::default();
        assert!(base.clone().with_grid(0, 10).validate().is_err());
        assert!(base.clone().with_grid(20, 0).validate().is_err());
        assert!(base.clone().with_grid(u32::MAX, 2).validate().is_err());
        assert!(base.clone().with_samples(0).validate().is_err());
        assert!(base.clone().with_jpeg_quality(0).validate().is_err());
        assert!(base.with_jpeg_quality(101).validate().is_err());
    }

    #[test]
    fn test_output_path_joins_dir() {
        let config = BenchConfig::default().with_output_dir("/tmp/out");
        assert_eq!(
            config.output_path("raqote.jpg"),
            PathBuf::from("/tmp/out/raqote.jpg")
        );
    }
}
