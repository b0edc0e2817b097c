//! Heightmap synthesis, river carving and biome coloring over a regular grid.
#![forbid(unsafe_code)]

pub mod biome;
pub mod cancel;
pub mod config;
pub mod elevation;
mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod hydrology;
pub mod river_index;
mod rng;

pub use biome::{Biome, BiomeBands, Rgb};
pub use cancel::CancelToken;
pub use config::{TerrainConfig, load_config_from_path};
pub use error::TerrainError;
pub use export::TerrainImage;
pub use generator::{GenTimings, Terrain, TerrainGenerator};
pub use grid::{Grid, GridSpace};
pub use hydrology::{HydrologyReport, RiverPath};
pub use relief_noise::NoiseField;
pub use river_index::RiverIndex;
pub use rng::RngSeq;
