use std::collections::{HashMap, HashSet};

use umbra_core::{Point, Topology, ring};

use crate::queue::PriorityQueue;
use crate::terrain::Terrain;

/// Label-setting shortest-path search over the implicit grid graph.
///
/// Neighbors come from `ring(pos, 1, topology)`. A node's cost is final the
/// first time it is popped; later pops of the same node are skipped.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dijkstra {
    topology: Topology,
}

impl Dijkstra {
    pub fn new(topology: Topology) -> Self {
        Self { topology }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Compute the cheapest path from `start` to `goal`.
    ///
    /// Returns the full path (including both endpoints), or `None` once the
    /// frontier is exhausted without reaching `goal`. Blocked cells are never
    /// expanded, so a blocked goal is unreachable unless it is also `start`.
    pub fn compute<T: Terrain>(&self, terrain: &T, start: Point, goal: Point) -> Option<Vec<Point>> {
        if start == goal {
            return Some(vec![start]);
        }

        let mut open = PriorityQueue::new();
        let mut best: HashMap<Point, f64> = HashMap::new();
        let mut parent: HashMap<Point, Point> = HashMap::new();
        let mut closed: HashSet<Point> = HashSet::new();

        best.insert(start, 0.0);
        open.insert(start, 0.0);

        while let Some((cur, g)) = open.pop() {
            if !closed.insert(cur) {
                continue;
            }
            if cur == goal {
                log::trace!("dijkstra: reached {goal} from {start} at cost {g} ({} closed)", closed.len());
                return Some(reconstruct(&parent, start, goal));
            }

            for n in ring(cur, 1, self.topology) {
                if closed.contains(&n) || terrain.is_blocked(n) {
                    continue;
                }
                let tentative = g + terrain.cost(cur, n);
                if best.get(&n).is_some_and(|&b| tentative >= b) {
                    continue;
                }
                best.insert(n, tentative);
                parent.insert(n, cur);
                open.insert(n, tentative);
            }
        }

        log::trace!("dijkstra: {goal} unreachable from {start} ({} closed)", closed.len());
        None
    }
}

fn reconstruct(parent: &HashMap<Point, Point>, start: Point, goal: Point) -> Vec<Point> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = parent[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Open, TerrainFn};
    use umbra_core::Range;

    fn bounded(rng: Range, walls: &'static [(i32, i32)]) -> impl Terrain {
        TerrainFn::blocking(move |p: Point| {
            !rng.contains(p) || walls.iter().any(|&(x, y)| p == Point::new(x, y))
        })
    }

    #[test]
    fn start_equals_goal() {
        let p = Point::new(3, 3);
        assert_eq!(Dijkstra::new(Topology::Four).compute(&Open, p, p), Some(vec![p]));
    }

    #[test]
    fn adjacent_goal() {
        let s = Point::new(0, 0);
        for (topology, goal) in [
            (Topology::Four, Point::new(0, 1)),
            (Topology::Eight, Point::new(1, 1)),
        ] {
            assert_eq!(
                Dijkstra::new(topology).compute(&Open, s, goal),
                Some(vec![s, goal])
            );
        }
    }

    #[test]
    fn straight_line_length() {
        let path = Dijkstra::new(Topology::Four)
            .compute(&Open, Point::new(0, 0), Point::new(4, 0))
            .unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(4, 0)));
        for w in path.windows(2) {
            assert_eq!(Topology::Four.distance(w[0], w[1]), 1);
        }
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let terrain = bounded(
            Range::new(0, 0, 5, 5),
            &[(3, 2), (4, 2), (3, 3), (3, 4)],
        );
        let d = Dijkstra::new(Topology::Eight);
        assert_eq!(d.compute(&terrain, Point::new(0, 0), Point::new(4, 4)), None);
    }

    #[test]
    fn routes_around_walls() {
        // A wall across x = 2 with a gap at y = 4.
        let terrain = bounded(Range::new(0, 0, 5, 5), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
        let path = Dijkstra::new(Topology::Four)
            .compute(&terrain, Point::new(0, 0), Point::new(4, 0))
            .unwrap();
        assert!(path.contains(&Point::new(2, 4)));
        assert_eq!(path.len(), 13);
    }

    #[test]
    fn prefers_cheaper_terrain() {
        // Crossing row y = 0 is expensive; the detour through y = 1 is cheaper.
        let terrain = TerrainFn::new(
            |p: Point| !Range::new(0, 0, 5, 3).contains(p),
            |_: Point, to: Point| if to.y == 0 && to.x > 0 && to.x < 4 { 10.0 } else { 1.0 },
        );
        let path = Dijkstra::new(Topology::Four)
            .compute(&terrain, Point::new(0, 0), Point::new(4, 0))
            .unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 1),
                Point::new(4, 0),
            ]
        );
    }
}
