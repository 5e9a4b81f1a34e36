use indexmap::IndexMap;
use umbra_core::{Point, Topology, ring};

use crate::queue::PriorityQueue;
use crate::terrain::Terrain;

/// A reachable position with the cheapest range found for it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeNode {
    pub pos: Point,
    pub range: f64,
}

/// Bounds of a [`RangeFinder`] query, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeQuery {
    pub min_range: f64,
    pub max_range: f64,
}

impl RangeQuery {
    /// Everything within `max_range`, the start included.
    pub fn within(max_range: f64) -> Self {
        Self {
            min_range: 0.0,
            max_range,
        }
    }
}

impl Default for RangeQuery {
    fn default() -> Self {
        Self::within(1.0)
    }
}

/// Reachable-set search bounded by accumulated cost.
///
/// Unlike [`Dijkstra`](crate::Dijkstra) this search is label-correcting: a
/// cell that was already reached is expanded again whenever a strictly
/// cheaper range to it turns up.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeFinder {
    topology: Topology,
}

impl RangeFinder {
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Every cell whose cheapest range from `start` lies within the query
    /// bounds, in order of first discovery.
    ///
    /// Expansion of a branch stops once its cost exceeds `max_range`; blocked
    /// cells are never entered.
    pub fn compute<T: Terrain>(&self, terrain: &T, start: Point, query: RangeQuery) -> Vec<RangeNode> {
        let mut best: IndexMap<Point, f64> = IndexMap::new();
        let mut open = PriorityQueue::new();
        best.insert(start, 0.0);
        open.insert(start, 0.0);

        let mut expansions = 0usize;
        while let Some((cur, r)) = open.pop() {
            // A cheaper label was found after this entry was queued.
            if best.get(&cur).is_some_and(|&b| r > b) {
                continue;
            }
            expansions += 1;

            for n in ring(cur, 1, self.topology) {
                if terrain.is_blocked(n) {
                    continue;
                }
                let nr = r + terrain.cost(cur, n);
                if nr > query.max_range {
                    continue;
                }
                if best.get(&n).is_some_and(|&b| nr >= b) {
                    continue;
                }
                best.insert(n, nr);
                open.insert(n, nr);
            }
        }
        log::trace!(
            "range finder: {} cells labelled from {start} in {expansions} expansions",
            best.len()
        );

        best.into_iter()
            .filter(|&(_, r)| r >= query.min_range && r <= query.max_range)
            .map(|(pos, range)| RangeNode { pos, range })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Open, TerrainFn};
    use umbra_core::Range;

    #[test]
    fn zero_range_is_start_only() {
        let s = Point::new(4, -2);
        let found = RangeFinder::new(Topology::Eight).compute(&Open, s, RangeQuery::within(0.0));
        assert_eq!(found, vec![RangeNode { pos: s, range: 0.0 }]);
    }

    #[test]
    fn four_topology_ring_band() {
        let query = RangeQuery {
            min_range: 1.0,
            max_range: 2.0,
        };
        let found = RangeFinder::new(Topology::Four).compute(&Open, Point::ZERO, query);
        assert_eq!(found.len(), 12);
        for node in &found {
            let d = Topology::Four.distance(Point::ZERO, node.pos);
            assert_eq!(node.range, d as f64, "wrong range for {}", node.pos);
        }
        assert_eq!(found.iter().filter(|n| n.range == 1.0).count(), 4);
        assert_eq!(found.iter().filter(|n| n.range == 2.0).count(), 8);
    }

    #[test]
    fn eight_topology_square() {
        let found = RangeFinder::new(Topology::Eight).compute(&Open, Point::ZERO, RangeQuery::within(2.0));
        assert_eq!(found.len(), 25);
        assert_eq!(found[0], RangeNode { pos: Point::ZERO, range: 0.0 });
    }

    #[test]
    fn each_cell_once_with_minimal_range() {
        // Diagonal steps are expensive, so many cells are first reached through
        // a diagonal and later corrected through orthogonal steps.
        let terrain = TerrainFn::weighted(|from: Point, to: Point| {
            if from.x != to.x && from.y != to.y { 3.0 } else { 1.0 }
        });
        let found = RangeFinder::new(Topology::Eight).compute(&terrain, Point::ZERO, RangeQuery::within(3.0));
        assert_eq!(found.len(), 25);
        let mut seen = std::collections::HashSet::new();
        for node in &found {
            assert!(seen.insert(node.pos));
            let manhattan = Topology::Four.distance(Point::ZERO, node.pos) as f64;
            assert_eq!(node.range, manhattan, "wrong range for {}", node.pos);
        }
        let corner = found.iter().find(|n| n.pos == Point::new(1, 1)).unwrap();
        assert_eq!(corner.range, 2.0);
    }

    #[test]
    fn blocked_cells_are_not_entered() {
        let rng = Range::new(0, 0, 3, 1);
        let terrain = TerrainFn::blocking(move |p: Point| !rng.contains(p) || p == Point::new(1, 0));
        let found = RangeFinder::new(Topology::Four).compute(&terrain, Point::ZERO, RangeQuery::within(5.0));
        assert_eq!(found, vec![RangeNode { pos: Point::ZERO, range: 0.0 }]);
    }
}
