//! Neighbor connectivity and ring traversal.
//!
//! [`ring`] is the shared primitive behind shadowcasting and pathfinding: both
//! depend on its traversal order, which starts on the +x axis and walks east,
//! north-east, north, north-west, west, south-west, south and south-east
//! (north is −y).

use crate::geom::Point;

/// Neighbor connectivity model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Orthogonal moves only; distance is Manhattan.
    Four,
    /// Orthogonal and diagonal moves; distance is Chebyshev.
    #[default]
    Eight,
}

impl Topology {
    /// Distance between two points under this topology's metric.
    #[inline]
    pub fn distance(self, a: Point, b: Point) -> i32 {
        match self {
            Topology::Four => manhattan(a, b),
            Topology::Eight => chebyshev(a, b),
        }
    }

    /// The adjacent cells of `p`, in ring order.
    #[inline]
    pub fn neighbors(self, p: Point) -> Vec<Point> {
        ring(p, 1, self)
    }
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// The cells at exact distance `radius` from `origin`.
///
/// Radius 0 yields `[origin]`. Otherwise [`Topology::Eight`] yields the
/// `8·radius` cells of a square perimeter and [`Topology::Four`] the
/// `4·radius` cells of a diamond, both starting at `origin + (radius, 0)`.
/// Negative radii yield nothing.
pub fn ring(origin: Point, radius: i32, topology: Topology) -> Vec<Point> {
    if radius < 0 {
        return Vec::new();
    }
    if radius == 0 {
        return vec![origin];
    }
    let r = radius;
    match topology {
        Topology::Eight => {
            let mut cells = Vec::with_capacity(8 * r as usize);
            // East edge, upper half.
            cells.extend((0..r).map(|k| origin.shift(r, -k)));
            // North edge, east to west.
            cells.extend((0..2 * r).map(|k| origin.shift(r - k, -r)));
            // West edge, north to south.
            cells.extend((0..2 * r).map(|k| origin.shift(-r, -r + k)));
            // South edge, west to east.
            cells.extend((0..2 * r).map(|k| origin.shift(-r + k, r)));
            // East edge, lower half.
            cells.extend((0..r).map(|k| origin.shift(r, r - k)));
            cells
        }
        Topology::Four => {
            let mut cells = Vec::with_capacity(4 * r as usize);
            cells.extend((0..r).map(|k| origin.shift(r - k, -k)));
            cells.extend((0..r).map(|k| origin.shift(-k, -r + k)));
            cells.extend((0..r).map(|k| origin.shift(-r + k, k)));
            cells.extend((0..r).map(|k| origin.shift(k, r - k)));
            cells
        }
    }
}
