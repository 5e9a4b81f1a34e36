//! Field of vision by precise shadowcasting.
//!
//! The viewer sweeps outward ring by ring (see [`umbra_core::ring`]). On a
//! ring of `L` cells, cell `i` owns the slice `[(2i−1)/2L, (2i+1)/2L)` of the
//! circle, wrapping around zero for `i = 0`. Opaque cells add their slice to
//! a list of shadows, and every cell is reported with the fraction of its
//! slice that nearer shadows leave uncovered. Slices are exact rationals, so
//! visibility does not depend on floating-point rounding.

use umbra_core::{Point, Topology, ring};

use crate::arc::{Arc, Fraction, Shadows};

/// A cell reached by a shadowcasting sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityNode {
    pub pos: Point,
    /// Ring index of the cell, i.e. its distance from the viewer.
    pub range: i32,
    /// Uncovered fraction of the cell's slice, in `(0, 1]`.
    pub visibility: f64,
}

/// Precise shadowcasting field of vision.
///
/// A `Shadowcaster` keeps its shadow buffer between calls so repeated
/// queries do not reallocate.
#[derive(Debug, Clone, Default)]
pub struct Shadowcaster {
    topology: Topology,
    shadows: Shadows,
}

impl Shadowcaster {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            shadows: Shadows::default(),
        }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Sweep from `origin` up to `max_range`, calling `callback` once per
    /// visible cell.
    ///
    /// The origin is always reported first with range 0 and visibility 1.
    /// `light_passes` tells whether light crosses a cell; opaque cells are
    /// still reported when visible. The sweep ends early once shadows cover
    /// the whole circle.
    pub fn calculate_callback(
        &mut self,
        origin: Point,
        max_range: i32,
        light_passes: impl Fn(Point) -> bool,
        mut callback: impl FnMut(VisibilityNode),
    ) {
        self.shadows.clear();
        callback(VisibilityNode {
            pos: origin,
            range: 0,
            visibility: 1.0,
        });

        for r in 1..=max_range {
            let cells = ring(origin, r, self.topology);
            let len = cells.len() as i64;
            let den = 2 * len;
            for (i, &cell) in cells.iter().enumerate() {
                let i = i as i64;
                let greater = Fraction::new(2 * i + 1, den);
                let lesser = if i == 0 {
                    Fraction::new(2 * len - 1, den)
                } else {
                    Fraction::new(2 * i - 1, den)
                };
                let parts = slices(lesser, greater);

                let visibility = match parts {
                    (a, Some(b)) => {
                        (self.shadows.visible_fraction(a) + self.shadows.visible_fraction(b)) / 2.0
                    }
                    (a, None) => self.shadows.visible_fraction(a),
                };
                if visibility > 0.0 {
                    callback(VisibilityNode {
                        pos: cell,
                        range: r,
                        visibility,
                    });
                }

                if !light_passes(cell) {
                    self.shadows.insert(parts.0);
                    if let Some(b) = parts.1 {
                        self.shadows.insert(b);
                    }
                }
            }
            if self.shadows.is_full() {
                break;
            }
        }
    }

    /// Sweep from `origin` and collect every visible cell.
    pub fn calculate(
        &mut self,
        origin: Point,
        max_range: i32,
        light_passes: impl Fn(Point) -> bool,
    ) -> Vec<VisibilityNode> {
        let mut visible = Vec::new();
        self.calculate_callback(origin, max_range, light_passes, |n| visible.push(n));
        visible
    }
}

/// The arc `[lesser, greater)`, split in two when it wraps past zero.
fn slices(lesser: Fraction, greater: Fraction) -> (Arc, Option<Arc>) {
    if lesser > greater {
        (
            Arc::new(lesser, Fraction::ONE),
            Some(Arc::new(Fraction::ZERO, greater)),
        )
    } else {
        (Arc::new(lesser, greater), None)
    }
}
