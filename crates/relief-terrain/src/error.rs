use relief_noise::PermutationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("grid dimensions must be positive and addressable, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("world size must be finite and positive, got {0}")]
    InvalidWorldSize(f64),
    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    InvalidPermutation(#[from] PermutationError),
    #[error("generation cancelled")]
    Cancelled,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),
}
