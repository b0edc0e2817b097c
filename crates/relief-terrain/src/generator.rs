use std::time::{Duration, Instant};

use rand::Rng;
use relief_noise::NoiseField;

use crate::cancel::{self, CancelToken};
use crate::hydrology::{self, HydrologyReport, RiverPath};
use crate::{
    Biome, BiomeBands, Grid, GridSpace, Rgb, RiverIndex, RngSeq, TerrainConfig, TerrainError,
    elevation,
};

/// Wall-clock time spent in each generation stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenTimings {
    pub elevation: Duration,
    pub hydrology: Duration,
    pub classification: Duration,
}

impl GenTimings {
    pub fn total(&self) -> Duration {
        self.elevation + self.hydrology + self.classification
    }
}

/// Output of one generation. Every grid shares the same row-major layout.
#[derive(Clone, Debug)]
pub struct Terrain {
    pub space: GridSpace,
    pub elevation: Grid<f32>,
    pub biomes: Grid<Biome>,
    pub colors: Grid<Rgb>,
    pub rivers: Vec<RiverPath>,
    pub discarded_rivers: usize,
    pub river_cells: usize,
    pub timings: GenTimings,
}

impl Terrain {
    #[inline]
    pub fn width(&self) -> usize {
        self.space.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.space.height
    }

    /// One elevation per cell, row-major.
    pub fn elevation_buffer(&self) -> &[f32] {
        self.elevation.as_slice()
    }

    /// Three floats (r, g, b) per cell, same ordering as the elevation buffer.
    pub fn color_buffer(&self) -> Vec<f32> {
        self.colors.as_slice().iter().flatten().copied().collect()
    }

    /// `[x, elevation, z]` per cell in world space, y-up, grid centered on the origin.
    pub fn vertex_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.elevation.len() * 3);
        for y in 0..self.height() {
            for x in 0..self.width() {
                let [wx, wz] = self.space.world(x, y);
                out.extend_from_slice(&[wx as f32, *self.elevation.get(x, y), wz as f32]);
            }
        }
        out
    }

    /// Two triangles per grid quad, wound counter-clockwise seen from +y.
    pub fn triangle_indices(&self) -> Vec<u32> {
        let (w, h) = (self.width(), self.height());
        if w < 2 || h < 2 {
            return Vec::new();
        }
        let mut out = Vec::with_capacity((w - 1) * (h - 1) * 6);
        for y in 0..h - 1 {
            for x in 0..w - 1 {
                let a = (y * w + x) as u32;
                let b = a + 1;
                let c = a + w as u32;
                let d = c + 1;
                out.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        out
    }

    pub fn biome_histogram(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for b in self.biomes.as_slice() {
            counts[b.index()] += 1;
        }
        counts
    }

    pub fn elevation_range(&self) -> (f32, f32) {
        self.elevation
            .as_slice()
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

/// Seeded terrain synthesizer. Holds no per-run state, so one instance can serve
/// any number of `generate` calls, including from several threads.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    seed: u64,
    noise: NoiseField,
    config: TerrainConfig,
}

impl TerrainGenerator {
    pub fn new(seed: u64, config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let noise = NoiseField::new(RngSeq::new(seed).seed_for(RngSeq::NOISE));
        Ok(Self {
            seed,
            noise,
            config,
        })
    }

    /// Uses a caller-built noise field instead of deriving one from the seed.
    pub fn with_noise(
        seed: u64,
        noise: NoiseField,
        config: TerrainConfig,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        Ok(Self {
            seed,
            noise,
            config,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn generate(
        &self,
        grid_width: usize,
        grid_height: usize,
        world_size: f64,
    ) -> Result<Terrain, TerrainError> {
        let mut rng = RngSeq::new(self.seed).for_phase(RngSeq::RIVERS);
        self.run(grid_width, grid_height, world_size, &mut rng, None)
    }

    pub fn generate_cancellable(
        &self,
        grid_width: usize,
        grid_height: usize,
        world_size: f64,
        cancel: &CancelToken,
    ) -> Result<Terrain, TerrainError> {
        let mut rng = RngSeq::new(self.seed).for_phase(RngSeq::RIVERS);
        self.run(grid_width, grid_height, world_size, &mut rng, Some(cancel))
    }

    /// Draws river sources from `rng` instead of the seed-derived stream.
    pub fn generate_with_rng<R: Rng>(
        &self,
        grid_width: usize,
        grid_height: usize,
        world_size: f64,
        rng: &mut R,
    ) -> Result<Terrain, TerrainError> {
        self.run(grid_width, grid_height, world_size, rng, None)
    }

    fn run<R: Rng>(
        &self,
        grid_width: usize,
        grid_height: usize,
        world_size: f64,
        rng: &mut R,
        cancel: Option<&CancelToken>,
    ) -> Result<Terrain, TerrainError> {
        let space = GridSpace::new(grid_width, grid_height, world_size)?;
        let mut timings = GenTimings::default();

        let stage = Instant::now();
        let mut elevation =
            elevation::synthesize(&self.noise, &space, &self.config.elevation, cancel)?;
        timings.elevation = stage.elapsed();

        let stage = Instant::now();
        let HydrologyReport {
            rivers,
            discarded,
            carved_cells,
        } = hydrology::carve_rivers(&mut elevation, &space, &self.config.hydrology, rng, cancel)?;
        timings.hydrology = stage.elapsed();

        let stage = Instant::now();
        let (biomes, colors, river_cells) = self.classify(&space, &elevation, &rivers, cancel)?;
        timings.classification = stage.elapsed();

        log::debug!(target: "terrain", "stage timings: elevation={:?} hydrology={:?} classify={:?} carved={}",
            timings.elevation, timings.hydrology, timings.classification, carved_cells);
        log::info!(target: "terrain", "generated {}x{} terrain seed={} rivers={} discarded={} river_cells={} in {:?}",
            space.width, space.height, self.seed, rivers.len(), discarded, river_cells, timings.total());

        Ok(Terrain {
            space,
            elevation,
            biomes,
            colors,
            rivers,
            discarded_rivers: discarded,
            river_cells,
            timings,
        })
    }

    fn classify(
        &self,
        space: &GridSpace,
        elevation: &Grid<f32>,
        rivers: &[RiverPath],
        cancel: Option<&CancelToken>,
    ) -> Result<(Grid<Biome>, Grid<Rgb>, usize), TerrainError> {
        let bands = BiomeBands::from(&self.config.biomes);
        let index = RiverIndex::build(rivers, self.config.biomes.river_epsilon);
        let mut biomes = Vec::with_capacity(space.cells());
        let mut colors = Vec::with_capacity(space.cells());
        let mut river_cells = 0;
        for y in 0..space.height {
            cancel::check(cancel)?;
            for x in 0..space.width {
                let [nx, ny] = space.normalized(x, y);
                let is_river = index.contains(nx, ny);
                river_cells += usize::from(is_river);
                let (biome, rgb) = bands.shade(*elevation.get(x, y), is_river);
                biomes.push(biome);
                colors.push(rgb);
            }
        }
        Ok((
            Grid::from_vec(space.width, space.height, biomes),
            Grid::from_vec(space.width, space.height, colors),
            river_cells,
        ))
    }
}
