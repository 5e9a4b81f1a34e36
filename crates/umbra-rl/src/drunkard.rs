//! Random-walk ("drunkard's walk") cave carving.

use umbra_core::{Grid, Point, Topology};

use crate::random::Random;

/// Parameters of a single [`DrunkardsWalk::walk`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkOptions {
    pub start: Point,
    /// Maximum number of moves.
    pub steps: usize,
    /// Stop as soon as this fraction of the grid has been carved, in `[0, 1]`.
    pub max_coverage: f64,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            start: Point::ZERO,
            steps: 100,
            max_coverage: 1.0,
        }
    }
}

/// Carves `floor` into a grid of `wall` by repeated random walks.
///
/// Coverage accumulates across walks: it is the share of distinct cells
/// carved by any walk so far.
#[derive(Debug, Clone)]
pub struct DrunkardsWalk<T> {
    grid: Grid<T>,
    floor: T,
    topology: Topology,
    carved: Vec<bool>,
    covered: usize,
    paths: Vec<Vec<Point>>,
}

impl<T: Clone> DrunkardsWalk<T> {
    pub fn new(width: i32, height: i32, wall: T, floor: T, topology: Topology) -> Self {
        let grid = Grid::filled(width, height, wall);
        let carved = vec![false; grid.len()];
        Self {
            grid,
            floor,
            topology,
            carved,
            covered: 0,
            paths: Vec::new(),
        }
    }

    /// Walk from `opts.start`, carving every visited cell.
    ///
    /// Each move goes to a uniformly chosen in-bounds neighbor. The walk ends
    /// after `opts.steps` moves or once coverage reaches
    /// `opts.max_coverage`, whichever comes first. Returns the visited
    /// positions, start included; an out-of-bounds start, or a grid already
    /// at coverage, yields an empty path.
    pub fn walk<R: Random + ?Sized>(&mut self, rng: &mut R, opts: WalkOptions) -> Vec<Point> {
        if !self.grid.contains(opts.start) || self.coverage() >= opts.max_coverage {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut pos = opts.start;
        self.carve(pos);
        path.push(pos);

        for _ in 0..opts.steps {
            if self.coverage() >= opts.max_coverage {
                break;
            }
            let neighbors = self.grid.neighbors(pos, self.topology);
            let Some(&next) = rng.next_item(&neighbors) else {
                break;
            };
            pos = next;
            self.carve(pos);
            path.push(pos);
        }
        log::debug!(
            "drunkard: walked {} cells from {}, coverage {:.3}",
            path.len(),
            opts.start,
            self.coverage()
        );

        self.paths.push(path.clone());
        path
    }

    /// Number of distinct cells carved so far.
    #[inline]
    pub fn covered(&self) -> usize {
        self.covered
    }

    /// Share of the grid carved so far, in `[0, 1]`.
    pub fn coverage(&self) -> f64 {
        if self.carved.is_empty() {
            return 1.0;
        }
        self.covered as f64 / self.carved.len() as f64
    }

    /// Every path walked so far, oldest first.
    pub fn paths(&self) -> &[Vec<Point>] {
        &self.paths
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }

    fn carve(&mut self, p: Point) {
        if self.grid.set(p, self.floor.clone()).is_err() {
            return;
        }
        let i = self.grid.index(p);
        if !self.carved[i] {
            self.carved[i] = true;
            self.covered += 1;
        }
    }
}
