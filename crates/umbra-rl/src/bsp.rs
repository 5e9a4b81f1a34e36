//! Binary space partition dungeons: split, place rooms, join them.

use umbra_core::{Grid, GridError, Point, Range};

use crate::random::Random;

/// Aspect ratio beyond which the long side is always the one cut.
const MAX_ASPECT: f64 = 1.25;

/// How leaves are split.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BspConfig {
    /// Minimum length of either side of a cut.
    pub min_leaf: i32,
    /// Smallest share of the cut side given to either child, in `[0, 0.5]`.
    pub split_ratio: f64,
}

impl Default for BspConfig {
    fn default() -> Self {
        Self {
            min_leaf: 4,
            split_ratio: 0.3,
        }
    }
}

/// Room size limits used by [`BspDungeonBuilder::create_rooms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomConfig {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
    /// Cells kept clear between a room and the edge of its leaf.
    pub padding: i32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_width: 3,
            min_height: 3,
            max_width: 10,
            max_height: 10,
            padding: 1,
        }
    }
}

/// A node of the partition tree. Children exactly tile their parent.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BspNode {
    bounds: Range,
    depth: u32,
    children: Option<Box<[BspNode; 2]>>,
    room: Option<Range>,
}

impl BspNode {
    fn leaf(bounds: Range, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            children: None,
            room: None,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn children(&self) -> Option<&[BspNode; 2]> {
        self.children.as_deref()
    }

    /// The room carved in this leaf, if any.
    pub fn room(&self) -> Option<Range> {
        self.room
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Leaves under this node, left to right.
    pub fn leaves(&self) -> Vec<&BspNode> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a BspNode>) {
        match &self.children {
            Some(children) => children.iter().for_each(|c| c.collect_leaves(out)),
            None => out.push(self),
        }
    }

    fn collect_leaves_mut<'a>(&'a mut self, out: &mut Vec<&'a mut BspNode>) {
        if self.children.is_none() {
            out.push(self);
            return;
        }
        if let Some(children) = self.children.as_mut() {
            for c in children.iter_mut() {
                c.collect_leaves_mut(out);
            }
        }
    }

    /// Cut this leaf in two. Returns `false`, leaving it untouched, when no
    /// cut satisfies `config`.
    fn split<R: Random + ?Sized>(&mut self, rng: &mut R, config: BspConfig) -> bool {
        let (w, h) = (self.bounds.width(), self.bounds.height());
        let cut_x = if w as f64 > h as f64 * MAX_ASPECT {
            true
        } else if h as f64 > w as f64 * MAX_ASPECT {
            false
        } else {
            rng.next_bool()
        };

        let len = if cut_x { w } else { h };
        let lo = config.min_leaf.max((len as f64 * config.split_ratio).ceil() as i32);
        let hi = (len - config.min_leaf).min((len as f64 * (1.0 - config.split_ratio)).floor() as i32);
        if lo > hi {
            return false;
        }
        let offset = rng.next_int(lo, hi + 1);

        let Range { min, max } = self.bounds;
        let (a, b) = if cut_x {
            (
                Range::new(min.x, min.y, min.x + offset, max.y),
                Range::new(min.x + offset, min.y, max.x, max.y),
            )
        } else {
            (
                Range::new(min.x, min.y, max.x, min.y + offset),
                Range::new(min.x, min.y + offset, max.x, max.y),
            )
        };
        let depth = self.depth + 1;
        self.children = Some(Box::new([BspNode::leaf(a, depth), BspNode::leaf(b, depth)]));
        true
    }
}

/// A corridor between two room centers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hallway {
    pub from: Point,
    pub to: Point,
    /// Carved cells from `from` to `to`, one orthogonal step apart.
    pub cells: Vec<Point>,
}

/// Builds a dungeon over a grid of `wall` by recursive partitioning.
///
/// ```
/// use rand::SeedableRng;
/// use umbra_rl::{BspDungeonBuilder, RoomConfig};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let mut bsp = BspDungeonBuilder::new(80, 60, '#', '.');
/// bsp.split_by_count(&mut rng, 4);
/// bsp.create_rooms(&mut rng, RoomConfig::default()).unwrap();
/// bsp.create_simple_hallways(&mut rng).unwrap();
/// assert_eq!(bsp.leaves().len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct BspDungeonBuilder<T> {
    grid: Grid<T>,
    floor: T,
    config: BspConfig,
    root: BspNode,
    hallways: Vec<Hallway>,
}

impl<T: Clone> BspDungeonBuilder<T> {
    pub fn new(width: i32, height: i32, wall: T, floor: T) -> Self {
        let grid = Grid::filled(width, height, wall);
        let root = BspNode::leaf(grid.bounds(), 0);
        Self {
            grid,
            floor,
            config: BspConfig::default(),
            root,
            hallways: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BspConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> BspConfig {
        self.config
    }

    /// Split every leaf, `count` times over. Leaves that cannot be cut stay
    /// leaves. Returns the number of leaves afterwards.
    pub fn split_by_count<R: Random + ?Sized>(&mut self, rng: &mut R, count: usize) -> usize {
        for round in 0..count {
            let mut leaves = Vec::new();
            self.root.collect_leaves_mut(&mut leaves);
            let before = leaves.len();
            let mut cut = 0;
            for leaf in leaves {
                if leaf.split(rng, self.config) {
                    cut += 1;
                }
            }
            log::trace!("bsp: round {} cut {cut} of {before} leaves", round + 1);
        }
        let total = self.root.leaves().len();
        log::debug!("bsp: {total} leaves after {count} rounds");
        total
    }

    /// Carve one room per leaf, kept `padding` cells inside it.
    ///
    /// Leaves too small for `config` get no room. Returns the number of rooms
    /// carved.
    pub fn create_rooms<R: Random + ?Sized>(&mut self, rng: &mut R, config: RoomConfig) -> Result<usize, GridError> {
        let mut leaves = Vec::new();
        self.root.collect_leaves_mut(&mut leaves);

        let mut carved = 0;
        for leaf in leaves {
            let p = config.padding;
            let inner = leaf.bounds.shift(p, p, -p, -p);
            if inner.width() < config.min_width || inner.height() < config.min_height {
                log::debug!("bsp: leaf {:?} too small for a room", leaf.bounds);
                continue;
            }
            let w = rng.next_int(config.min_width, config.max_width.min(inner.width()) + 1);
            let h = rng.next_int(config.min_height, config.max_height.min(inner.height()) + 1);
            let x = rng.next_int(inner.min.x, inner.max.x - w + 1);
            let y = rng.next_int(inner.min.y, inner.max.y - h + 1);
            let room = Range::with_size(Point::new(x, y), w, h);
            for q in room {
                self.grid.set(q, self.floor.clone())?;
            }
            leaf.room = Some(room);
            carved += 1;
        }
        log::debug!("bsp: carved {carved} rooms");
        Ok(carved)
    }

    /// Chain all rooms, in shuffled order, with L-shaped hallways between
    /// consecutive centers. Returns the number of hallways carved.
    pub fn create_simple_hallways<R: Random + ?Sized>(&mut self, rng: &mut R) -> Result<usize, GridError> {
        let mut rooms = self.rooms();
        rng.shuffle(&mut rooms);

        let mut added = 0;
        for pair in rooms.windows(2) {
            let (from, to) = (pair[0].center(), pair[1].center());
            let elbow = if rng.next_bool() {
                Point::new(to.x, from.y)
            } else {
                Point::new(from.x, to.y)
            };
            let mut cells = straight(from, elbow);
            cells.extend(straight(elbow, to).into_iter().skip(1));
            for &q in &cells {
                self.grid.set(q, self.floor.clone())?;
            }
            self.hallways.push(Hallway { from, to, cells });
            added += 1;
        }
        log::debug!("bsp: {added} hallways between {} rooms", rooms.len());
        Ok(added)
    }

    pub fn root(&self) -> &BspNode {
        &self.root
    }

    pub fn leaves(&self) -> Vec<&BspNode> {
        self.root.leaves()
    }

    /// Rooms in leaf order.
    pub fn rooms(&self) -> Vec<Range> {
        self.root.leaves().into_iter().filter_map(BspNode::room).collect()
    }

    pub fn hallways(&self) -> &[Hallway] {
        &self.hallways
    }

    pub fn grid(&self) -> &Grid<T> {
        &self.grid
    }

    pub fn into_grid(self) -> Grid<T> {
        self.grid
    }
}

/// Cells from `a` to `b` inclusive; the two must share a row or column.
fn straight(a: Point, b: Point) -> Vec<Point> {
    let step = Point::new((b.x - a.x).signum(), (b.y - a.y).signum());
    let mut cells = vec![a];
    let mut cur = a;
    while cur != b {
        cur = cur + step;
        cells.push(cur);
    }
    cells
}
