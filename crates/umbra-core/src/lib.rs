//! **umbra-core**: grid storage and geometry for roguelike algorithms.
//!
//! This crate provides the foundational types used across the *umbra*
//! workspace: integer geometry, a dense optional-value [`Grid`], and the
//! [`ring`] traversal that field-of-view and pathfinding share.

pub mod geom;
pub mod grid;
pub mod topology;

pub use geom::{GeomError, Point, Range, centroid, closest};
pub use grid::{Grid, GridError};
pub use topology::{Topology, chebyshev, manhattan, ring};
