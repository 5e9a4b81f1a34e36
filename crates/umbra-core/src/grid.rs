//! The [`Grid`] type: dense 2D storage of optional cell values.
//!
//! Reads are total: any coordinate may be queried and out-of-bounds positions
//! read as empty. Writes are checked: writing outside the grid is a caller
//! bug and reported as [`GridError::OutOfBounds`].

use std::collections::VecDeque;
use std::fmt;

use crate::geom::{Point, Range};
use crate::topology::{Topology, ring};

/// Errors raised by grid writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// A write targeted a coordinate outside `[0, width) × [0, height)`.
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// Stored cells do not match the declared dimensions.
    SizeMismatch { width: i32, height: i32, cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "position {pos} out of bounds for {width}x{height} grid")
            }
            Self::SizeMismatch { width, height, cells } => {
                write!(f, "{cells} cells do not fill a {width}x{height} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A fixed-size 2D grid of optional values in row-major order.
///
/// Cloning copies the storage; clones never alias each other.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridRepr<T>")
)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<Option<T>>,
}

/// Serialized form of a [`Grid`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr<T> {
    width: i32,
    height: i32,
    cells: Vec<Option<T>>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<GridRepr<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(repr: GridRepr<T>) -> Result<Self, GridError> {
        let GridRepr { width, height, cells } = repr;
        if width < 0 || height < 0 || cells.len() != area(width, height) {
            return Err(GridError::SizeMismatch {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self { width, height, cells })
    }
}

/// Number of cells in a `width` × `height` grid, computed without `i32`
/// overflow. Negative sides count as zero.
#[inline]
fn area(width: i32, height: i32) -> usize {
    width.max(0) as usize * height.max(0) as usize
}

impl<T> Grid<T> {
    /// Create an empty grid. Negative dimensions are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut cells = Vec::new();
        cells.resize_with(area(width, height), || None);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Create a grid whose cells are produced by `f`, in row-major order.
    pub fn from_fn(width: i32, height: i32, mut f: impl FnMut(Point) -> Option<T>) -> Self {
        let mut grid = Self::new(width, height);
        for p in grid.bounds() {
            let i = grid.index(p);
            grid.cells[i] = f(p);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Whether `p` is addressable.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Number of cells, `width × height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Storage index of `p`, which must be in bounds.
    #[inline]
    pub fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    fn check(&self, p: Point) -> Result<usize, GridError> {
        if self.contains(p) {
            Ok(self.index(p))
        } else {
            Err(GridError::OutOfBounds {
                pos: p,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The value at `p`, or `None` if the cell is empty or out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&T> {
        if !self.contains(p) {
            return None;
        }
        self.cells[self.index(p)].as_ref()
    }

    /// Store `value` at `p`.
    pub fn set(&mut self, p: Point, value: T) -> Result<(), GridError> {
        let i = self.check(p)?;
        self.cells[i] = Some(value);
        Ok(())
    }

    /// Empty the cell at `p`, returning its previous value.
    pub fn remove(&mut self, p: Point) -> Result<Option<T>, GridError> {
        let i = self.check(p)?;
        Ok(self.cells[i].take())
    }

    /// Row-major iterator over every position and its value.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Option<&T>)> {
        self.bounds()
            .into_iter()
            .zip(self.cells.iter().map(Option::as_ref))
    }

    /// In-bounds neighbors of `p` in ring order.
    pub fn neighbors(&self, p: Point, topology: Topology) -> Vec<Point> {
        self.neighbors_where(p, topology, |_, _| true)
    }

    /// In-bounds neighbors of `p` in ring order for which `keep` holds.
    pub fn neighbors_where(
        &self,
        p: Point,
        topology: Topology,
        mut keep: impl FnMut(Point, Option<&T>) -> bool,
    ) -> Vec<Point> {
        ring(p, 1, topology)
            .into_iter()
            .filter(|&n| self.contains(n) && keep(n, self.get(n)))
            .collect()
    }
}

impl Grid<char> {
    /// Build a grid from text rows, one character per cell.
    ///
    /// The width is that of the longest row. Spaces and the missing tail of
    /// shorter rows are empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as i32;
        let mut grid = Self::new(width, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch != ' ' {
                    let i = y * width as usize + x;
                    grid.cells[i] = Some(ch);
                }
            }
        }
        grid
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(width: i32, height: i32, value: T) -> Self {
        let mut grid = Self::new(width, height);
        grid.fill(value);
        grid
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        for c in self.cells.iter_mut() {
            *c = Some(value.clone());
        }
    }
}

impl<T: PartialEq> Grid<T> {
    /// Number of cells holding `value`.
    pub fn count(&self, value: &T) -> usize {
        self.cells.iter().filter(|c| c.as_ref() == Some(value)).count()
    }

    /// Breadth-first selection of the 4-connected region around `p` whose
    /// cells equal `target`.
    ///
    /// `target` defaults to the value at `p` (possibly empty). Returns an
    /// empty selection when `p` is out of bounds or does not hold `target`.
    /// Cells are returned in discovery order, starting with `p`.
    pub fn flood_fill_select(&self, p: Point, target: Option<&T>) -> Vec<Point> {
        if !self.contains(p) {
            return Vec::new();
        }
        let target = target.or(self.get(p));
        if self.get(p) != target {
            return Vec::new();
        }

        let mut seen = vec![false; self.cells.len()];
        let mut queue = VecDeque::new();
        let mut selected = Vec::new();
        seen[self.index(p)] = true;
        queue.push_back(p);

        while let Some(cur) = queue.pop_front() {
            selected.push(cur);
            for n in ring(cur, 1, Topology::Four) {
                if !self.contains(n) {
                    continue;
                }
                let i = self.index(n);
                if seen[i] || self.get(n) != target {
                    continue;
                }
                seen[i] = true;
                queue.push_back(n);
            }
        }
        selected
    }
}
