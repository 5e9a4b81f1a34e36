use umbra_core::Point;

/// Per-call description of the implicit grid graph searched by
/// [`Dijkstra`](crate::Dijkstra) and [`RangeFinder`](crate::RangeFinder).
///
/// The graph is unbounded: a search that must stay inside a map relies on
/// `is_blocked` returning `true` outside of it.
pub trait Terrain {
    /// Whether `p` may not be entered. Defaults to `false`.
    fn is_blocked(&self, _p: Point) -> bool {
        false
    }

    /// Cost of stepping from `from` to the adjacent `to`. Defaults to 1.
    ///
    /// Must be `>= 0`; negative costs are not checked and give unspecified
    /// results.
    fn cost(&self, _from: Point, _to: Point) -> f64 {
        1.0
    }
}

/// Open, unit-cost terrain: nothing blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Open;

impl Terrain for Open {}

impl<T: Terrain + ?Sized> Terrain for &T {
    fn is_blocked(&self, p: Point) -> bool {
        (**self).is_blocked(p)
    }

    fn cost(&self, from: Point, to: Point) -> f64 {
        (**self).cost(from, to)
    }
}

/// [`Terrain`] built from closures.
pub struct TerrainFn<B, C> {
    is_blocked: B,
    cost: C,
}

impl<B, C> TerrainFn<B, C>
where
    B: Fn(Point) -> bool,
    C: Fn(Point, Point) -> f64,
{
    pub fn new(is_blocked: B, cost: C) -> Self {
        Self { is_blocked, cost }
    }
}

impl<B> TerrainFn<B, fn(Point, Point) -> f64>
where
    B: Fn(Point) -> bool,
{
    /// Unit-cost terrain with a blocking predicate.
    pub fn blocking(is_blocked: B) -> Self {
        Self {
            is_blocked,
            cost: |_, _| 1.0,
        }
    }
}

impl<C> TerrainFn<fn(Point) -> bool, C>
where
    C: Fn(Point, Point) -> f64,
{
    /// Weighted terrain where nothing blocks.
    pub fn weighted(cost: C) -> Self {
        Self {
            is_blocked: |_| false,
            cost,
        }
    }
}

impl<B, C> Terrain for TerrainFn<B, C>
where
    B: Fn(Point) -> bool,
    C: Fn(Point, Point) -> f64,
{
    fn is_blocked(&self, p: Point) -> bool {
        (self.is_blocked)(p)
    }

    fn cost(&self, from: Point, to: Point) -> f64 {
        (self.cost)(from, to)
    }
}
