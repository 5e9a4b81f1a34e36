//! Cave generation by cellular automata.

use umbra_core::{Grid, Point, Topology, ring};

use crate::connect::{ConnectError, Connection, connect};
use crate::random::Random;

/// Survival and birth thresholds over the 8-cell Moore neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellularRule {
    /// A live cell with fewer live neighbors than this dies.
    pub death_limit: u8,
    /// A dead cell with more live neighbors than this comes alive.
    pub birth_limit: u8,
    /// Whether positions outside the grid count as live neighbors.
    pub edges_alive: bool,
}

impl Default for CellularRule {
    fn default() -> Self {
        Self {
            death_limit: 4,
            birth_limit: 3,
            edges_alive: true,
        }
    }
}

/// A two-state cellular automaton over a [`Grid`].
///
/// Every cell holds either `alive` or `dead`. Typical use is
/// [`randomize`](Self::randomize), a few [`do_simulation_step`](Self::do_simulation_step)
/// generations, then [`connect`](Self::connect).
#[derive(Debug, Clone)]
pub struct CellularAutomata<T> {
    grid: Grid<T>,
    alive: T,
    dead: T,
    rule: CellularRule,
}

impl<T: Clone + PartialEq> CellularAutomata<T> {
    /// A `width` × `height` automaton with every cell dead.
    pub fn new(width: i32, height: i32, alive: T, dead: T) -> Self {
        let grid = Grid::filled(width, height, dead.clone());
        Self::with_grid(grid, alive, dead)
    }

    /// Run the automaton over an existing grid. Cells holding anything
    /// other than `alive` count as dead.
    pub fn with_grid(grid: Grid<T>, alive: T, dead: T) -> Self {
        Self {
            grid,
            alive,
            dead,
            rule: CellularRule::default(),
        }
    }

    pub fn with_rule(mut self, rule: CellularRule) -> Self {
        self.rule = rule;
        self
    }

    #[inline]
    pub fn rule(&self) -> CellularRule {
        self.rule
    }

    /// Seed every cell, one draw per cell in row-major order. A cell becomes
    /// alive iff its draw exceeds `chance`, so a higher `chance` leaves fewer
    /// live cells.
    pub fn randomize<R: Random + ?Sized>(&mut self, rng: &mut R, chance: f64) {
        self.grid = Grid::from_fn(self.grid.width(), self.grid.height(), |_| {
            Some(if rng.next_f64() > chance {
                self.alive.clone()
            } else {
                self.dead.clone()
            })
        });
        log::debug!(
            "cellular: randomized {}x{} at chance {chance}, {} alive",
            self.grid.width(),
            self.grid.height(),
            self.grid.count(&self.alive)
        );
    }

    /// Advance `steps` generations. Each generation reads the previous one
    /// only, writing into a fresh buffer.
    pub fn do_simulation_step(&mut self, steps: usize) {
        for step in 0..steps {
            let next = Grid::from_fn(self.grid.width(), self.grid.height(), |p| {
                let n = self.live_neighbors(p);
                let alive = if self.is_alive(p) {
                    n >= self.rule.death_limit as usize
                } else {
                    n > self.rule.birth_limit as usize
                };
                Some(if alive { self.alive.clone() } else { self.dead.clone() })
            });
            self.grid = next;
            log::trace!("cellular: step {}, {} alive", step + 1, self.grid.count(&self.alive));
        }
    }

    /// Join every live region, see [`connect`](crate::connect()).
    pub fn connect(&mut self) -> Result<Connection, ConnectError> {
        connect(&mut self.grid, &self.alive)
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }

    fn is_alive(&self, p: Point) -> bool {
        self.grid.get(p) == Some(&self.alive)
    }

    fn live_neighbors(&self, p: Point) -> usize {
        ring(p, 1, Topology::Eight)
            .into_iter()
            .filter(|&n| {
                if self.grid.contains(n) {
                    self.is_alive(n)
                } else {
                    self.rule.edges_alive
                }
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::Sequence;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn cave(seed: u64) -> Grid<bool> {
        let mut ca = CellularAutomata::new(40, 30, true, false);
        let mut rng = StdRng::seed_from_u64(seed);
        ca.randomize(&mut rng, 0.45);
        ca.do_simulation_step(4);
        ca.into_grid()
    }

    #[test]
    fn same_seed_same_cave() {
        assert_eq!(cave(7), cave(7));
    }

    #[test]
    fn chance_is_an_exclusive_lower_bound() {
        let mut ca = CellularAutomata::new(4, 1, 'o', '.');
        let mut rng = Sequence::new(&[0.2, 0.5, 0.7, 0.9]);
        ca.randomize(&mut rng, 0.5);
        let row: String = (0..4).filter_map(|x| ca.grid().get(Point::new(x, 0))).collect();
        assert_eq!(row, "..oo");
    }

    #[test]
    fn randomize_overwrites_every_cell() {
        let mut grid = Grid::from_rows(&["? ?", "   "]);
        grid.set(Point::new(1, 1), 'x').unwrap();
        let mut ca = CellularAutomata::with_grid(grid, 'o', '.');
        let mut rng = Sequence::new(&[0.9, 0.1]);
        ca.randomize(&mut rng, 0.5);
        assert_eq!(ca.grid().count(&'o') + ca.grid().count(&'.'), ca.grid().len());
        let row: String = (0..3).filter_map(|x| ca.grid().get(Point::new(x, 1))).collect();
        assert_eq!(row, ".o.");
    }

    #[test]
    fn extreme_chances() {
        let mut ca = CellularAutomata::new(10, 10, 1u8, 0u8);
        let mut rng = StdRng::seed_from_u64(11);
        ca.randomize(&mut rng, 1.0);
        assert_eq!(ca.grid().count(&1), 0);
        ca.randomize(&mut rng, -0.1);
        assert_eq!(ca.grid().count(&1), 100);
    }

    #[test]
    fn edges_count_as_alive() {
        let mut ca = CellularAutomata::new(3, 3, '#', '.');
        ca.do_simulation_step(1);
        // Only corners see more than three live (outside) neighbors.
        for p in ca.grid().bounds() {
            let corner = (p.x == 0 || p.x == 2) && (p.y == 0 || p.y == 2);
            assert_eq!(ca.grid().get(p) == Some(&'#'), corner, "{p}");
        }
        ca.do_simulation_step(1);
        assert_eq!(ca.grid().count(&'#'), 9);
    }

    #[test]
    fn closed_edges_erode_a_lone_cell() {
        let mut grid = Grid::filled(5, 5, false);
        grid.set(Point::new(2, 2), true).unwrap();
        let mut ca = CellularAutomata::with_grid(grid, true, false).with_rule(CellularRule {
            edges_alive: false,
            ..CellularRule::default()
        });
        ca.do_simulation_step(1);
        assert_eq!(ca.grid().count(&true), 0);
    }

    #[test]
    fn connect_leaves_a_single_cave() {
        let mut ca = CellularAutomata::new(30, 20, '.', '#');
        let mut rng = StdRng::seed_from_u64(3);
        ca.randomize(&mut rng, 0.55);
        ca.do_simulation_step(2);
        ca.connect().unwrap();
        assert!(crate::connect::groups(ca.grid(), &'.').len() <= 1);
    }
}
