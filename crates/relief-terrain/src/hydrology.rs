//! Greedy downhill river walks that carve their beds into the elevation grid.
//!
//! Walks run over shaped elevation, so shaping must happen first. A walk that ends up
//! shorter than the minimum length is dropped from the output, but by default the
//! cells it carved stay carved.

use rand::Rng;

use crate::cancel::{self, CancelToken};
use crate::config::Hydrology;
use crate::{Grid, GridSpace, TerrainError};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RiverPath {
    cells: Vec<(usize, usize)>,
    points: Vec<[f64; 2]>,
}

impl RiverPath {
    /// Builds a path over `cells`, deriving the normalized points from `space`.
    pub fn from_cells(cells: &[(usize, usize)], space: &GridSpace) -> Self {
        let mut path = Self::default();
        for &(x, y) in cells {
            path.push((x, y), space.normalized(x, y));
        }
        path
    }

    fn push(&mut self, cell: (usize, usize), point: [f64; 2]) {
        self.cells.push(cell);
        self.points.push(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Visited cells as `(column, row)`, source first.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Normalized coordinates of the visited cells, in [-0.5, 0.5].
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }
}

/// One walk plus the elevation each carved cell had before carving.
#[derive(Debug)]
pub(crate) struct Walk {
    pub path: RiverPath,
    pub carved: Vec<((usize, usize), f32)>,
}

#[derive(Clone, Debug, Default)]
pub struct HydrologyReport {
    pub rivers: Vec<RiverPath>,
    pub discarded: usize,
    pub carved_cells: usize,
}

/// Lowest in-bounds 8-neighbor. Scans `dx` then `dy` from -1 to 1; ties keep the
/// first neighbor seen.
fn lowest_neighbor(elevation: &Grid<f32>, x: usize, y: usize) -> Option<((usize, usize), f32)> {
    let mut lowest: Option<((usize, usize), f32)> = None;
    for dx in -1isize..=1 {
        for dy in -1isize..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some((nx, ny)) = elevation.offset(x, y, dx, dy) else {
                continue;
            };
            let h = *elevation.get(nx, ny);
            if lowest.is_none_or(|(_, lh)| h < lh) {
                lowest = Some(((nx, ny), h));
            }
        }
    }
    lowest
}

/// Walks downhill from `start` until the path holds `max_length` cells or no
/// neighbor is strictly lower. Each cell moved into is lowered by `carve_depth`,
/// floored at `bed_elevation`; with the bed inside the height range, carved cells stay
/// inside it too.
pub(crate) fn walk_downhill(
    elevation: &mut Grid<f32>,
    space: &GridSpace,
    start: (usize, usize),
    cfg: &Hydrology,
) -> Walk {
    let (mut x, mut y) = start;
    let mut path = RiverPath::default();
    let mut carved = Vec::new();
    while path.len() < cfg.max_length {
        path.push((x, y), space.normalized(x, y));
        let here = *elevation.get(x, y);
        let Some(((nx, ny), lh)) = lowest_neighbor(elevation, x, y) else {
            break;
        };
        if lh >= here {
            break;
        }
        x = nx;
        y = ny;
        let cell = elevation.get_mut(x, y);
        carved.push(((x, y), *cell));
        *cell = (*cell - cfg.carve_depth).max(cfg.bed_elevation);
    }
    Walk { path, carved }
}

/// Runs `river_count` walks from uniformly random cells drawn from `rng`.
pub fn carve_rivers<R: Rng>(
    elevation: &mut Grid<f32>,
    space: &GridSpace,
    cfg: &Hydrology,
    rng: &mut R,
    cancel: Option<&CancelToken>,
) -> Result<HydrologyReport, TerrainError> {
    let mut report = HydrologyReport::default();
    for i in 0..cfg.river_count {
        cancel::check(cancel)?;
        let start = (
            rng.random_range(0..space.width),
            rng.random_range(0..space.height),
        );
        let walk = walk_downhill(elevation, space, start, cfg);
        report.carved_cells += walk.carved.len();
        if walk.path.len() >= cfg.min_length {
            log::debug!(target: "terrain", "river {} kept: start={:?} len={}", i, start, walk.path.len());
            report.rivers.push(walk.path);
        } else {
            log::debug!(target: "terrain", "river {} discarded: start={:?} len={} < {}",
                i, start, walk.path.len(), cfg.min_length);
            report.discarded += 1;
            if cfg.rollback_discarded {
                for &((cx, cy), before) in walk.carved.iter().rev() {
                    elevation.set(cx, cy, before);
                }
                report.carved_cells -= walk.carved.len();
            }
        }
    }
    if cfg.river_count > 0 && report.rivers.is_empty() {
        log::warn!(target: "terrain", "all {} river walks were shorter than {} cells",
            cfg.river_count, cfg.min_length);
    }
    Ok(report)
}
