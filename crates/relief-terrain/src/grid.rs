use crate::TerrainError;

/// Dense row-major 2D storage: the cell at column `x`, row `y` lives at `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Wraps an existing row-major buffer. Panics if the length does not match.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), width * height, "grid buffer length mismatch");
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let i = self.idx(x, y);
        &mut self.data[i]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// In-bounds neighbor of `(x, y)` offset by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

}

/// Maps grid cells onto normalized and world-space coordinates.
///
/// Normalized coordinates span [-0.5, 0.5] on both axes with the first and last
/// column (row) on the edges; world coordinates are the normalized ones times
/// `world_size`, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpace {
    pub width: usize,
    pub height: usize,
    pub world_size: f64,
}

impl GridSpace {
    pub fn new(width: usize, height: usize, world_size: f64) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        // Vertex indices are emitted as u32.
        if width.saturating_mul(height) > u32::MAX as usize {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        if !world_size.is_finite() || world_size <= 0.0 {
            return Err(TerrainError::InvalidWorldSize(world_size));
        }
        Ok(Self {
            width,
            height,
            world_size,
        })
    }

    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    fn axis(i: usize, n: usize) -> f64 {
        if n <= 1 {
            0.0
        } else {
            i as f64 / (n - 1) as f64 - 0.5
        }
    }

    #[inline]
    pub fn normalized(&self, x: usize, y: usize) -> [f64; 2] {
        [Self::axis(x, self.width), Self::axis(y, self.height)]
    }

    #[inline]
    pub fn world(&self, x: usize, y: usize) -> [f64; 2] {
        let [nx, ny] = self.normalized(x, y);
        [nx * self.world_size, ny * self.world_size]
    }
}
