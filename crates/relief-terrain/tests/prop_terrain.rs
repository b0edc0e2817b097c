use proptest::prelude::*;
use relief_terrain::{
    Biome, GridSpace, RiverIndex, RiverPath, TerrainConfig, TerrainGenerator,
    river_index::scan_contains,
};

fn dim() -> impl Strategy<Value = usize> {
    1usize..=40
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    // Elevation stays inside [min_height, max_height] after carving
    #[test]
    fn elevation_within_bounds(seed in any::<u64>(), w in dim(), h in dim(), size in 0.01f64..1.0e4) {
        let cfg = TerrainConfig::default();
        let t = TerrainGenerator::new(seed, cfg.clone()).unwrap().generate(w, h, size).unwrap();
        prop_assert_eq!(t.elevation_buffer().len(), w * h);
        for &e in t.elevation_buffer() {
            prop_assert!(e >= cfg.elevation.min_height && e <= cfg.elevation.max_height, "e = {}", e);
        }
    }

    // Same bound for any validated height range and bed
    #[test]
    fn elevation_within_configured_range(
        seed in any::<u64>(),
        min in -10.0f32..10.0,
        span in 1.0f32..40.0,
        bed_at in 0.0f32..=1.0,
        depth in 0.0f32..3.0,
    ) {
        let mut cfg = TerrainConfig::default();
        cfg.elevation.min_height = min;
        cfg.elevation.max_height = min + span;
        cfg.hydrology.bed_elevation = min + span * bed_at;
        cfg.hydrology.carve_depth = depth;
        cfg.hydrology.river_count = 40;
        // Keep the bands ordered whatever the range is.
        cfg.biomes.water_level = -1.0e6;
        let t = TerrainGenerator::new(seed, cfg.clone()).unwrap().generate(48, 48, 100.0).unwrap();
        for &e in t.elevation_buffer() {
            prop_assert!(e >= cfg.elevation.min_height && e <= cfg.elevation.max_height, "e = {}", e);
        }
    }

    // Kept rivers meet the minimum length; colors are in range and agree with biomes
    #[test]
    fn outputs_are_consistent(seed in any::<u64>(), w in 20usize..=60, h in 20usize..=60) {
        let cfg = TerrainConfig::default();
        let t = TerrainGenerator::new(seed, cfg.clone()).unwrap().generate(w, h, 100.0).unwrap();
        for r in &t.rivers {
            prop_assert!(r.len() >= cfg.hydrology.min_length);
        }
        prop_assert_eq!(t.color_buffer().len(), w * h * 3);
        for (rgb, biome) in t.colors.as_slice().iter().zip(t.biomes.as_slice()) {
            for c in rgb {
                prop_assert!((0.0..=1.0).contains(c));
            }
            if *biome == Biome::Water {
                prop_assert_eq!(*rgb, Biome::Water.color(0.0));
            }
        }
    }

    // Non-river cells never land in a lower band than a lower cell
    #[test]
    fn bands_follow_elevation(seed in any::<u64>()) {
        let t = TerrainGenerator::new(seed, TerrainConfig::default()).unwrap().generate(48, 48, 100.0).unwrap();
        let index = RiverIndex::build(&t.rivers, 0.005);
        let mut cells: Vec<(f32, Biome)> = Vec::new();
        for y in 0..t.height() {
            for x in 0..t.width() {
                let [nx, ny] = t.space.normalized(x, y);
                if !index.contains(nx, ny) {
                    cells.push((*t.elevation.get(x, y), *t.biomes.get(x, y)));
                }
            }
        }
        cells.sort_by(|a, b| a.0.total_cmp(&b.0));
        for pair in cells.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
        }
    }

    // Bucketed lookup agrees with scanning every point
    #[test]
    fn index_matches_scan(
        cells in proptest::collection::vec((0usize..64, 0usize..64), 0..40),
        qx in 0usize..64,
        qy in 0usize..64,
        eps in 0.001f64..0.05,
    ) {
        let space = GridSpace::new(64, 64, 1.0).unwrap();
        let rivers = vec![RiverPath::from_cells(&cells, &space)];
        let index = RiverIndex::build(&rivers, eps);
        let [x, y] = space.normalized(qx, qy);
        prop_assert_eq!(index.contains(x, y), scan_contains(&rivers, x, y, eps));
    }
}
