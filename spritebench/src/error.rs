use std::path::PathBuf;

/// Errors that abort a benchmark run.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("failed to read spritesheet {}", path.display())]
    ReadSpritesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{provider} failed to decode the spritesheet: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} cannot create a {width}x{height} canvas")]
    CanvasSize {
        provider: &'static str,
        width: u32,
        height: u32,
    },
    #[error("{provider} failed to draw: {message}")]
    Draw {
        provider: &'static str,
        message: String,
    },
    #[error("failed to encode canvas as JPEG")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
