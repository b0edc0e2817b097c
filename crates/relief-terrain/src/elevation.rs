use relief_noise::NoiseField;

use crate::cancel::{self, CancelToken};
use crate::config::Elevation;
use crate::{Grid, GridSpace, TerrainError};

/// Weighted layer sum at a normalized coordinate, before shaping.
pub fn raw_height(noise: &NoiseField, cfg: &Elevation, nx: f64, ny: f64) -> f64 {
    cfg.layers.iter().fold(cfg.bias, |acc, l| {
        acc + noise.fractal(nx * l.frequency, ny * l.frequency, l.octaves, l.persistence) * l.weight
    })
}

/// Clamps into [0, 1], applies the power curve, then maps onto the height range.
/// The result always lies within `[min_height, max_height]`.
#[inline]
pub fn shape_height(raw: f64, cfg: &Elevation) -> f32 {
    let unit = raw.clamp(0.0, 1.0).powf(cfg.exponent);
    let min = cfg.min_height as f64;
    let max = cfg.max_height as f64;
    (min + (max - min) * unit) as f32
}

/// Fills a fresh grid with shaped elevation samples.
pub fn synthesize(
    noise: &NoiseField,
    space: &GridSpace,
    cfg: &Elevation,
    cancel: Option<&CancelToken>,
) -> Result<Grid<f32>, TerrainError> {
    let mut data = Vec::with_capacity(space.cells());
    for y in 0..space.height {
        cancel::check(cancel)?;
        for x in 0..space.width {
            let [nx, ny] = space.normalized(x, y);
            data.push(shape_height(raw_height(noise, cfg, nx, ny), cfg));
        }
    }
    Ok(Grid::from_vec(space.width, space.height, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaping_clamps_out_of_range_sums() {
        let cfg = Elevation::default();
        assert_eq!(shape_height(-0.7, &cfg), -2.0);
        assert_eq!(shape_height(0.0, &cfg), -2.0);
        assert_eq!(shape_height(1.3, &cfg), 20.0);
        assert_eq!(shape_height(1.0, &cfg), 20.0);
        let mid = shape_height(0.25, &cfg);
        // 0.25^1.5 = 0.125
        assert!((mid - (-2.0 + 22.0 * 0.125)).abs() < 1e-5);
    }

    #[test]
    fn shaping_is_monotonic() {
        let cfg = Elevation::default();
        let mut prev = f32::NEG_INFINITY;
        for i in 0..=100 {
            let h = shape_height(i as f64 / 100.0, &cfg);
            assert!(h >= prev);
            prev = h;
        }
    }

    #[test]
    fn no_layers_gives_flat_bias() {
        let cfg = Elevation {
            layers: Vec::new(),
            ..Elevation::default()
        };
        let noise = NoiseField::new(5);
        assert_eq!(raw_height(&noise, &cfg, 0.2, -0.4), cfg.bias);
    }

    #[test]
    fn cancelled_before_first_row() {
        let token = CancelToken::new();
        token.cancel();
        let space = GridSpace::new(4, 4, 1.0).unwrap();
        let noise = NoiseField::new(1);
        let res = synthesize(&noise, &space, &Elevation::default(), Some(&token));
        assert!(matches!(res, Err(TerrainError::Cancelled)));
    }
}
