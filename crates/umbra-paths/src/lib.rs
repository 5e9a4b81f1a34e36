//! Graph searches over implicit 2D grids.
//!
//! - **Dijkstra** label-setting shortest path ([`Dijkstra::compute`])
//! - **Range finder** label-correcting reachable set ([`RangeFinder::compute`])
//!
//! Both walk neighbors produced by [`umbra_core::ring`] and share the
//! [`PriorityQueue`] primitive. The graph itself is described per call
//! through a [`Terrain`].
//!
//! | Search | Discipline | Result |
//! |---|---|---|
//! | [`Dijkstra`] | a node's cost is final when first popped | `Option<Vec<Point>>` |
//! | [`RangeFinder`] | a node is re-expanded when a cheaper cost appears | `Vec<RangeNode>` |

mod dijkstra;
mod queue;
mod range;
mod terrain;

pub use dijkstra::Dijkstra;
pub use queue::PriorityQueue;
pub use range::{RangeFinder, RangeNode, RangeQuery};
pub use terrain::{Open, Terrain, TerrainFn};
