use hashbrown::HashMap;

use crate::hydrology::RiverPath;

/// Bucketed lookup of river points for the "is this cell a river" test.
///
/// A cell matches when some point lies strictly within `epsilon` of it on both axes.
/// Buckets are `2 * epsilon` wide, so any match sits in the query's bucket or one of
/// its eight neighbors and the result equals a scan over every point.
#[derive(Debug)]
pub struct RiverIndex {
    epsilon: f64,
    bucket: f64,
    buckets: HashMap<(i64, i64), Vec<[f64; 2]>>,
    points: usize,
}

impl RiverIndex {
    pub fn build(rivers: &[RiverPath], epsilon: f64) -> Self {
        let bucket = epsilon * 2.0;
        let mut buckets: HashMap<(i64, i64), Vec<[f64; 2]>> = HashMap::new();
        let mut points = 0;
        for p in rivers.iter().flat_map(|r| r.points()) {
            buckets
                .entry(Self::key(bucket, p[0], p[1]))
                .or_default()
                .push(*p);
            points += 1;
        }
        Self {
            epsilon,
            bucket,
            buckets,
            points,
        }
    }

    #[inline]
    fn key(bucket: f64, x: f64, y: f64) -> (i64, i64) {
        ((x / bucket).floor() as i64, (y / bucket).floor() as i64)
    }

    pub fn len(&self) -> usize {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points == 0
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.points == 0 {
            return false;
        }
        let (kx, ky) = Self::key(self.bucket, x, y);
        for bx in kx - 1..=kx + 1 {
            for by in ky - 1..=ky + 1 {
                let Some(pts) = self.buckets.get(&(bx, by)) else {
                    continue;
                };
                if pts.iter().any(|p| near(p, x, y, self.epsilon)) {
                    return true;
                }
            }
        }
        false
    }
}

#[inline]
fn near(p: &[f64; 2], x: f64, y: f64, epsilon: f64) -> bool {
    (p[0] - x).abs() < epsilon && (p[1] - y).abs() < epsilon
}

/// Reference matcher: tests every point of every river.
pub fn scan_contains(rivers: &[RiverPath], x: f64, y: f64, epsilon: f64) -> bool {
    rivers
        .iter()
        .any(|r| r.points().iter().any(|p| near(p, x, y, epsilon)))
}
