//! Connectivity repair: join every 4-connected group of one value.
//!
//! Groups are found by flood fill in row-major discovery order and chained
//! pairwise. Between consecutive groups `A` and `B`, the path runs from the
//! cell of `A` nearest its own centroid to the cell of `B` nearest that
//! point, and every cell on it is set to the value.

use std::fmt;

use umbra_core::{GeomError, Grid, GridError, Point, Topology, centroid, closest};
use umbra_paths::{Dijkstra, TerrainFn};

/// Outcome of [`connect`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    /// The groups as they were before carving, in discovery order.
    pub groups: Vec<Vec<Point>>,
    /// One carved path per consecutive pair of groups, endpoints included.
    pub paths: Vec<Vec<Point>>,
}

/// Errors raised while repairing connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// No path exists between the two chosen endpoints.
    Unreachable { from: Point, to: Point },
    Geom(GeomError),
    Grid(GridError),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable { from, to } => write!(f, "no path from {from} to {to}"),
            Self::Geom(e) => write!(f, "connect: {e}"),
            Self::Grid(e) => write!(f, "connect: {e}"),
        }
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreachable { .. } => None,
            Self::Geom(e) => Some(e),
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GeomError> for ConnectError {
    fn from(e: GeomError) -> Self {
        Self::Geom(e)
    }
}

impl From<GridError> for ConnectError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

/// The 4-connected groups of cells holding `value`, in row-major order of
/// their first cell.
pub fn groups<T: PartialEq>(grid: &Grid<T>, value: &T) -> Vec<Vec<Point>> {
    let mut assigned = vec![false; grid.len()];
    let mut groups = Vec::new();
    for (p, v) in grid.iter() {
        if assigned[grid.index(p)] || v != Some(value) {
            continue;
        }
        let group = grid.flood_fill_select(p, Some(value));
        for &q in &group {
            assigned[grid.index(q)] = true;
        }
        groups.push(group);
    }
    groups
}

/// Carve paths of `value` until all cells holding it are 4-connected.
///
/// The search moves in four directions at unit cost and never leaves the
/// grid; the cells it crosses may hold anything.
pub fn connect<T: Clone + PartialEq>(grid: &mut Grid<T>, value: &T) -> Result<Connection, ConnectError> {
    let groups = groups(grid, value);
    let bounds = grid.bounds();
    let terrain = TerrainFn::blocking(move |p: Point| !bounds.contains(p));
    let dijkstra = Dijkstra::new(Topology::Four);

    let mut paths = Vec::with_capacity(groups.len().saturating_sub(1));
    for pair in groups.windows(2) {
        let [a, b] = pair else { continue };
        let from = closest(a, centroid(a)?)?;
        let to = closest(b, (from.x as f64, from.y as f64))?;
        let path = dijkstra
            .compute(&terrain, from, to)
            .ok_or(ConnectError::Unreachable { from, to })?;
        for &p in &path {
            grid.set(p, value.clone())?;
        }
        log::trace!("connect: bridged {from} to {to} in {} cells", path.len());
        paths.push(path);
    }
    log::debug!("connect: {} groups joined by {} paths", groups.len(), paths.len());

    Ok(Connection { groups, paths })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_in_row_major_order() {
        let grid = Grid::from_rows(&["#.#..", "#.###", "###.#"]);
        let found = groups(&grid, &'.');
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], vec![Point::new(1, 0), Point::new(1, 1)]);
        assert_eq!(found[1], vec![Point::new(3, 0), Point::new(4, 0)]);
        assert_eq!(found[2], vec![Point::new(3, 2)]);
    }

    #[test]
    fn two_pockets_get_one_path() {
        let mut grid = Grid::from_rows(&["#####", "#.#.#", "#####"]);
        let conn = connect(&mut grid, &'.').unwrap();
        assert_eq!(conn.groups, vec![vec![Point::new(1, 1)], vec![Point::new(3, 1)]]);
        assert_eq!(conn.paths.len(), 1);
        let path = &conn.paths[0];
        assert_eq!(path.first(), Some(&Point::new(1, 1)));
        assert_eq!(path.last(), Some(&Point::new(3, 1)));
        assert_eq!(path.len(), 3);
        assert_eq!(groups(&grid, &'.').len(), 1);
    }

    #[test]
    fn everything_ends_up_connected() {
        let mut grid = Grid::from_rows(&[
            ".#....#.",
            "##.##.##",
            "#.#..#..",
            "........",
            "#######.",
        ]);
        let before = groups(&grid, &'.').len();
        let conn = connect(&mut grid, &'.').unwrap();
        assert_eq!(conn.groups.len(), before);
        assert_eq!(conn.paths.len(), before - 1);
        assert_eq!(groups(&grid, &'.').len(), 1);
    }

    #[test]
    fn nothing_to_connect() {
        let mut grid = Grid::filled(4, 4, '#');
        let conn = connect(&mut grid, &'.').unwrap();
        assert_eq!(conn, Connection::default());
        assert_eq!(grid, Grid::filled(4, 4, '#'));
    }

    #[test]
    fn error_sources() {
        use std::error::Error;
        let e = ConnectError::from(GeomError::EmptyInput);
        assert!(e.source().is_some());
        let e = ConnectError::Unreachable {
            from: Point::ZERO,
            to: Point::new(1, 1),
        };
        assert!(e.source().is_none());
    }
}
