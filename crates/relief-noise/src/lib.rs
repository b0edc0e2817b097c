//! Seeded 3D simplex noise with fractal (fBm) summation.
#![forbid(unsafe_code)]

use std::fmt;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Number of distinct lattice hashes; the working table is twice this long.
pub const PERM_SIZE: usize = 256;

const F3: f64 = 1.0 / 3.0;
const G3: f64 = 1.0 / 6.0;

/// Squared radius of a corner's influence.
const RADIUS_SQ: f64 = 0.6;

/// Brings the summed corner contributions into roughly [-1, 1].
const OUTPUT_SCALE: f64 = 32.0;

const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PermutationError {
    /// The value appears more than once, so some other value is missing.
    Duplicate(u8),
}

impl fmt::Display for PermutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermutationError::Duplicate(v) => {
                write!(f, "permutation is not a bijection: {} appears twice", v)
            }
        }
    }
}

impl std::error::Error for PermutationError {}

/// Gradient noise field over R^3.
///
/// Every instance owns its own permutation table. The table is built once and never
/// changes, so a field is a pure function of its inputs and can be shared freely
/// across threads.
#[derive(Clone)]
pub struct NoiseField {
    perm: [u8; PERM_SIZE * 2],
    perm_mod12: [u8; PERM_SIZE * 2],
}

impl NoiseField {
    /// Builds a field whose permutation is a Fisher-Yates shuffle driven by `seed`.
    pub fn new(seed: u64) -> Self {
        let mut base: [u8; PERM_SIZE] = std::array::from_fn(|i| i as u8);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        base.shuffle(&mut rng);
        Self::from_table(&base)
    }

    /// Builds a field from an explicit permutation of `0..=255`.
    pub fn from_permutation(table: [u8; PERM_SIZE]) -> Result<Self, PermutationError> {
        let mut seen = [false; PERM_SIZE];
        for &v in &table {
            if seen[v as usize] {
                return Err(PermutationError::Duplicate(v));
            }
            seen[v as usize] = true;
        }
        Ok(Self::from_table(&table))
    }

    fn from_table(base: &[u8; PERM_SIZE]) -> Self {
        let perm: [u8; PERM_SIZE * 2] = std::array::from_fn(|i| base[i & (PERM_SIZE - 1)]);
        let perm_mod12 = perm.map(|v| v % 12);
        Self { perm, perm_mod12 }
    }

    /// The underlying 256-entry permutation.
    pub fn permutation(&self) -> &[u8] {
        &self.perm[..PERM_SIZE]
    }

    #[inline]
    fn gradient_index(&self, ii: usize, jj: usize, kk: usize, d: [usize; 3]) -> usize {
        let inner = self.perm[kk + d[2]] as usize;
        let mid = self.perm[jj + d[1] + inner] as usize;
        self.perm_mod12[ii + d[0] + mid] as usize
    }

    #[inline]
    fn corner(&self, gi: usize, x: f64, y: f64, z: f64) -> f64 {
        let t = RADIUS_SQ - x * x - y * y - z * z;
        if t <= 0.0 {
            return 0.0;
        }
        let g = &GRAD3[gi];
        let t = t * t;
        t * t * (g[0] * x + g[1] * y + g[2] * z)
    }

    /// Samples the field. Output stays within about [-1, 1]; non-finite input gives a
    /// non-finite result.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let s = (x + y + z) * F3;
        let i = (x + s).floor() as i64;
        let j = (y + s).floor() as i64;
        let k = (z + s).floor() as i64;
        let t = (i + j + k) as f64 * G3;

        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);
        let z0 = z - (k as f64 - t);

        // Which of the six tetrahedra of the skewed cube holds the point.
        let (c1, c2): ([usize; 3], [usize; 3]) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let x1 = x0 - c1[0] as f64 + G3;
        let y1 = y0 - c1[1] as f64 + G3;
        let z1 = z0 - c1[2] as f64 + G3;
        let x2 = x0 - c2[0] as f64 + 2.0 * G3;
        let y2 = y0 - c2[1] as f64 + 2.0 * G3;
        let z2 = z0 - c2[2] as f64 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let kk = (k & 255) as usize;

        let n0 = self.corner(self.gradient_index(ii, jj, kk, [0, 0, 0]), x0, y0, z0);
        let n1 = self.corner(self.gradient_index(ii, jj, kk, c1), x1, y1, z1);
        let n2 = self.corner(self.gradient_index(ii, jj, kk, c2), x2, y2, z2);
        let n3 = self.corner(self.gradient_index(ii, jj, kk, [1, 1, 1]), x3, y3, z3);

        OUTPUT_SCALE * (n0 + n1 + n2 + n3)
    }

    #[inline]
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.sample(x, y, 0.0)
    }

    /// Fractal sum of `octaves` layers at doubling frequency, each weighted by
    /// `persistence` relative to the previous one. Dividing by the summed amplitude
    /// keeps the result in the same range as a single sample. `octaves <= 0` yields 0.
    pub fn fractal(&self, x: f64, y: f64, octaves: i32, persistence: f64) -> f64 {
        if octaves <= 0 {
            return 0.0;
        }
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;
        for _ in 0..octaves {
            total += self.sample_2d(x * frequency, y * frequency) * amplitude;
            max_amplitude += amplitude;
            amplitude *= persistence;
            frequency *= 2.0;
        }
        total / max_amplitude
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField")
            .field("perm_head", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}
