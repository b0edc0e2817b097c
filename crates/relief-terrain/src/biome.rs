use crate::config::Biomes;

/// Linear RGB, each channel in [0, 1].
pub type Rgb = [f32; 3];

/// Elevation bands, ordered from lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Biome {
    Water,
    Beach,
    Forest,
    Mountain,
    Snow,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Water,
        Biome::Beach,
        Biome::Forest,
        Biome::Mountain,
        Biome::Snow,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Biome::Water => "water",
            Biome::Beach => "beach",
            Biome::Forest => "forest",
            Biome::Mountain => "mountain",
            Biome::Snow => "snow",
        }
    }

    /// Color at ramp position `t` (clamped to [0, 1]) within the band.
    pub fn color(self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        match self {
            Biome::Water => [0.1, 0.4, 0.8],
            Biome::Beach => [0.76, 0.7, 0.5],
            Biome::Forest => [0.1 + t * 0.1, 0.4 + t * 0.1, 0.1 + t * 0.1],
            Biome::Mountain => {
                let v = 0.4 + t * 0.3;
                [v, v, v]
            }
            Biome::Snow => [0.8 + t * 0.2, 0.8 + t * 0.2, 0.9 + t * 0.1],
        }
    }
}

/// Half-open elevation bands checked in ascending order; river cells are always water.
#[derive(Clone, Debug, PartialEq)]
pub struct BiomeBands {
    pub water_level: f32,
    pub beach_max: f32,
    pub forest_max: f32,
    pub mountain_max: f32,
    pub snow_span: f32,
}

impl Default for BiomeBands {
    fn default() -> Self {
        Self::from(&Biomes::default())
    }
}

impl From<&Biomes> for BiomeBands {
    fn from(cfg: &Biomes) -> Self {
        Self {
            water_level: cfg.water_level,
            beach_max: cfg.beach_max,
            forest_max: cfg.forest_max,
            mountain_max: cfg.mountain_max,
            snow_span: cfg.snow_span,
        }
    }
}

impl BiomeBands {
    pub fn classify(&self, h: f32, is_river: bool) -> Biome {
        if is_river || h <= self.water_level {
            Biome::Water
        } else if h < self.beach_max {
            Biome::Beach
        } else if h < self.forest_max {
            Biome::Forest
        } else if h < self.mountain_max {
            Biome::Mountain
        } else {
            Biome::Snow
        }
    }

    /// Position of `h` along its band's color ramp.
    fn ramp(&self, biome: Biome, h: f32) -> f32 {
        match biome {
            Biome::Water | Biome::Beach => 0.0,
            Biome::Forest => (h - self.beach_max) / (self.forest_max - self.beach_max),
            Biome::Mountain => (h - self.forest_max) / (self.mountain_max - self.forest_max),
            Biome::Snow => (h - self.mountain_max) / self.snow_span,
        }
    }

    pub fn shade(&self, h: f32, is_river: bool) -> (Biome, Rgb) {
        let biome = self.classify(h, is_river);
        (biome, biome.color(self.ramp(biome, h)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Rgb, b: Rgb) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn band_edges_are_half_open() {
        let b = BiomeBands::default();
        assert_eq!(b.classify(0.0, false), Biome::Water);
        assert_eq!(b.classify(0.001, false), Biome::Beach);
        assert_eq!(b.classify(2.0, false), Biome::Forest);
        assert_eq!(b.classify(8.0, false), Biome::Mountain);
        assert_eq!(b.classify(15.0, false), Biome::Snow);
        assert_eq!(b.classify(19.0, true), Biome::Water);
    }

    #[test]
    fn ramps_match_reference_colors() {
        let b = BiomeBands::default();
        assert!(close(b.shade(5.0, false).1, [0.15, 0.45, 0.15]));
        assert!(close(b.shade(15.0, false).1, [0.8, 0.8, 0.9]));
        assert!(close(b.shade(20.0, false).1, [1.0, 1.0, 1.0]));
        assert!(close(b.shade(-2.0, false).1, [0.1, 0.4, 0.8]));
        assert!(close(b.shade(1.0, false).1, [0.76, 0.7, 0.5]));
        let (biome, rgb) = b.shade(11.5, false);
        assert_eq!(biome, Biome::Mountain);
        assert!(close(rgb, [0.55, 0.55, 0.55]));
    }

    proptest! {
        // Every band color stays in the unit cube, whatever the ramp input
        #[test]
        fn colors_in_unit_range(biome in any::<Biome>(), t in -10.0f32..10.0) {
            for c in biome.color(t) {
                prop_assert!((0.0..=1.0).contains(&c));
            }
        }

        // Raising elevation never lowers the band while river membership is fixed
        #[test]
        fn classification_is_monotonic(a in -5.0f32..30.0, b in -5.0f32..30.0) {
            let bands = BiomeBands::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(bands.classify(lo, false) <= bands.classify(hi, false));
            prop_assert_eq!(bands.classify(lo, true), bands.classify(hi, true));
        }
    }
}
