use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::TerrainError;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TerrainConfig {
    #[serde(default)]
    pub elevation: Elevation,
    #[serde(default)]
    pub hydrology: Hydrology,
    #[serde(default)]
    pub biomes: Biomes,
}

// --- Elevation ---

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Elevation {
    #[serde(default = "default_layers")]
    pub layers: Vec<NoiseLayer>,
    /// Added to the weighted layer sum before clamping into [0, 1].
    #[serde(default = "default_bias")]
    pub bias: f64,
    #[serde(default = "default_exponent")]
    pub exponent: f64,
    #[serde(default = "default_min_height")]
    pub min_height: f32,
    #[serde(default = "default_max_height")]
    pub max_height: f32,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NoiseLayer {
    pub frequency: f64,
    pub weight: f64,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_persistence")]
    pub persistence: f64,
}

fn default_octaves() -> i32 {
    1
}
fn default_persistence() -> f64 {
    0.5
}
fn layer(frequency: f64, weight: f64) -> NoiseLayer {
    NoiseLayer {
        frequency,
        weight,
        octaves: default_octaves(),
        persistence: default_persistence(),
    }
}
fn default_layers() -> Vec<NoiseLayer> {
    vec![layer(0.5, 0.7), layer(2.0, 0.2), layer(8.0, 0.1)]
}
fn default_bias() -> f64 {
    0.3
}
fn default_exponent() -> f64 {
    1.5
}
fn default_min_height() -> f32 {
    -2.0
}
fn default_max_height() -> f32 {
    20.0
}
impl Default for Elevation {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            bias: default_bias(),
            exponent: default_exponent(),
            min_height: default_min_height(),
            max_height: default_max_height(),
        }
    }
}

// --- Hydrology ---

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Hydrology {
    #[serde(default = "default_river_count")]
    pub river_count: usize,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Walks stop once their path holds this many cells.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_carve_depth")]
    pub carve_depth: f32,
    #[serde(default = "default_bed_elevation")]
    pub bed_elevation: f32,
    /// Restore cells carved by walks that end up too short to keep.
    #[serde(default)]
    pub rollback_discarded: bool,
}
fn default_river_count() -> usize {
    5
}
fn default_min_length() -> usize {
    20
}
fn default_max_length() -> usize {
    20
}
fn default_carve_depth() -> f32 {
    0.5
}
fn default_bed_elevation() -> f32 {
    -1.0
}
impl Default for Hydrology {
    fn default() -> Self {
        Self {
            river_count: default_river_count(),
            min_length: default_min_length(),
            max_length: default_max_length(),
            carve_depth: default_carve_depth(),
            bed_elevation: default_bed_elevation(),
            rollback_discarded: false,
        }
    }
}

// --- Biome bands ---

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Biomes {
    /// Cells at or below this elevation are water.
    #[serde(default = "default_water_level")]
    pub water_level: f32,
    #[serde(default = "default_beach_max")]
    pub beach_max: f32,
    #[serde(default = "default_forest_max")]
    pub forest_max: f32,
    #[serde(default = "default_mountain_max")]
    pub mountain_max: f32,
    /// Elevation above `mountain_max` over which the snow ramp saturates.
    #[serde(default = "default_snow_span")]
    pub snow_span: f32,
    /// Half-width of the square around a river point, in normalized units.
    #[serde(default = "default_river_epsilon")]
    pub river_epsilon: f64,
}
fn default_water_level() -> f32 {
    0.0
}
fn default_beach_max() -> f32 {
    2.0
}
fn default_forest_max() -> f32 {
    8.0
}
fn default_mountain_max() -> f32 {
    15.0
}
fn default_snow_span() -> f32 {
    5.0
}
fn default_river_epsilon() -> f64 {
    0.005
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            water_level: default_water_level(),
            beach_max: default_beach_max(),
            forest_max: default_forest_max(),
            mountain_max: default_mountain_max(),
            snow_span: default_snow_span(),
            river_epsilon: default_river_epsilon(),
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), TerrainError> {
        let bad = |msg: String| Err(TerrainError::InvalidConfig(msg));
        let e = &self.elevation;
        for (i, l) in e.layers.iter().enumerate() {
            if l.octaves < 0 {
                return bad(format!("layer {i}: octaves must be >= 0, got {}", l.octaves));
            }
            if !(l.persistence > 0.0 && l.persistence <= 1.0) {
                return bad(format!(
                    "layer {i}: persistence must be in (0, 1], got {}",
                    l.persistence
                ));
            }
            if !l.frequency.is_finite() || !l.weight.is_finite() {
                return bad(format!("layer {i}: frequency and weight must be finite"));
            }
        }
        if !e.bias.is_finite() || !(e.exponent.is_finite() && e.exponent > 0.0) {
            return bad(format!(
                "bias must be finite and exponent positive, got {} / {}",
                e.bias, e.exponent
            ));
        }
        if !(e.min_height.is_finite() && e.max_height.is_finite() && e.min_height < e.max_height)
        {
            return bad(format!(
                "min_height {} must be below max_height {}",
                e.min_height, e.max_height
            ));
        }

        let h = &self.hydrology;
        if h.max_length < h.min_length {
            return bad(format!(
                "max_length {} is shorter than min_length {}",
                h.max_length, h.min_length
            ));
        }
        if !(h.carve_depth.is_finite() && h.carve_depth >= 0.0) || !h.bed_elevation.is_finite() {
            return bad("carve_depth must be >= 0 and bed_elevation finite".into());
        }
        // Carving takes max(h - carve_depth, bed_elevation), which stays in range only
        // when the bed itself does.
        if h.bed_elevation < e.min_height || h.bed_elevation > e.max_height {
            return bad(format!(
                "bed_elevation {} must lie within [{}, {}]",
                h.bed_elevation, e.min_height, e.max_height
            ));
        }

        let b = &self.biomes;
        let ordered = b.water_level < b.beach_max
            && b.beach_max < b.forest_max
            && b.forest_max < b.mountain_max;
        if !ordered {
            return bad(format!(
                "biome thresholds must ascend: {} < {} < {} < {}",
                b.water_level, b.beach_max, b.forest_max, b.mountain_max
            ));
        }
        if !(b.snow_span > 0.0) {
            return bad(format!("snow_span must be positive, got {}", b.snow_span));
        }
        if !(b.river_epsilon > 0.0 && b.river_epsilon.is_finite()) {
            return bad(format!(
                "river_epsilon must be positive, got {}",
                b.river_epsilon
            ));
        }
        Ok(())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<TerrainConfig, TerrainError> {
    let s = fs::read_to_string(path)?;
    let cfg: TerrainConfig = toml::from_str(&s)?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TerrainConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: TerrainConfig = toml::from_str(
            r#"
            [hydrology]
            river_count = 9
            rollback_discarded = true

            [biomes]
            beach_max = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(cfg.hydrology.river_count, 9);
        assert!(cfg.hydrology.rollback_discarded);
        assert_eq!(cfg.hydrology.min_length, 20);
        assert_eq!(cfg.biomes.beach_max, 3.0);
        assert_eq!(cfg.elevation, Elevation::default());
    }

    #[test]
    fn rejects_unordered_bands() {
        let mut cfg = TerrainConfig::default();
        cfg.biomes.forest_max = 1.0;
        assert!(matches!(cfg.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_negative_octaves() {
        let mut cfg = TerrainConfig::default();
        cfg.elevation.layers[1].octaves = -1;
        assert!(matches!(cfg.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_bed_outside_height_range() {
        let mut cfg = TerrainConfig::default();
        cfg.elevation.min_height = 0.0;
        assert!(matches!(cfg.validate(), Err(TerrainError::InvalidConfig(_))));
        cfg.hydrology.bed_elevation = 0.0;
        cfg.validate().unwrap();
        cfg.hydrology.bed_elevation = 25.0;
        assert!(matches!(cfg.validate(), Err(TerrainError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_short_max_length() {
        let mut cfg = TerrainConfig::default();
        cfg.hydrology.max_length = 5;
        assert!(matches!(cfg.validate(), Err(TerrainError::InvalidConfig(_))));
    }
}
