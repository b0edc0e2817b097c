use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use relief_terrain::{Biome, TerrainConfig, TerrainGenerator, TerrainImage, load_config_from_path};

#[derive(Parser, Debug)]
#[command(name = "relief", about = "Generate a seeded heightmap with rivers and biome colors")]
struct Args {
    /// Seed for noise and river placement
    #[arg(long)]
    seed: u64,
    /// Grid columns
    #[arg(long, default_value_t = 201)]
    width: usize,
    /// Grid rows
    #[arg(long, default_value_t = 201)]
    height: usize,
    /// Edge length of the square the grid spans, in world units
    #[arg(long, default_value_t = 100.0)]
    world_size: f64,
    /// TOML file with terrain parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the biome colors as a PNG
    #[arg(long)]
    png: Option<PathBuf>,
    /// Write a grayscale heightmap PNG
    #[arg(long)]
    heightmap: Option<PathBuf>,
    /// Log filter, e.g. `debug` or `terrain=debug`; RUST_LOG wins when set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = match &args.config {
        Some(path) => {
            log::info!("loading terrain config from {}", path.display());
            load_config_from_path(path)?
        }
        None => TerrainConfig::default(),
    };

    let generator = TerrainGenerator::new(args.seed, config)?;
    let terrain = generator.generate(args.width, args.height, args.world_size)?;

    let (lo, hi) = terrain.elevation_range();
    log::info!(
        "elevation range [{:.2}, {:.2}], {} river(s) kept, {} discarded, {} river cell(s)",
        lo,
        hi,
        terrain.rivers.len(),
        terrain.discarded_rivers,
        terrain.river_cells
    );
    let cells = (terrain.width() * terrain.height()) as f64;
    for (biome, count) in Biome::ALL.iter().zip(terrain.biome_histogram()) {
        log::info!(
            "  {:<8} {:>7} ({:.1}%)",
            biome.label(),
            count,
            100.0 * count as f64 / cells
        );
    }

    if let Some(path) = &args.png {
        TerrainImage::from_colors(&terrain).save_png(path)?;
    }
    if let Some(path) = &args.heightmap {
        TerrainImage::heightmap(&terrain).save_png(path)?;
    }
    Ok(())
}
