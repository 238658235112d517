//! **tilekit-core**: tile-grid spatial reasoning toolkit, core types.
//!
//! This crate provides the foundational pieces used across the *tilekit*
//! workspace: geometry primitives, the eight compass [`Direction`]s, the
//! row-major/column-major [`MajorOrder`] duality, the [`Tile`] /
//! [`TileGrid`] capability traits callers implement, and validated grid
//! addressing. The query and pathfinding crates are generic over these
//! capabilities only; the core never owns game entities or renders
//! anything.

pub mod addressing;
pub mod direction;
pub mod error;
pub mod geom;
pub mod grid;
pub mod order;
pub mod tile;

pub use addressing::{clamp, contains, tile_at, walkable_at};
pub use direction::Direction;
pub use error::GridError;
pub use geom::{Point, chebyshev, dist_sq, manhattan};
pub use grid::{FlatTile, VecGrid};
pub use order::MajorOrder;
pub use tile::{Tile, TileGrid};
