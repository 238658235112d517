//! Precomputed pathfinding structures for tile grids.
//!
//! Three structures, each trading build cost for query cost:
//!
//! - [`DijkstraField`]: one weighted source, cost and next step from
//!   every tile back to it
//! - [`DirectionGrid`]: one unweighted target, hop count and next step
//!   from every tile toward it
//! - [`DirectionAtlas`]: every walkable pair at once; built stepwise
//!   through [`AtlasTask`] with progress reporting and cancellation,
//!   and serializable to a compact binary form
//!
//! All three are immutable after construction and answer point queries
//! in O(1). Diagonal movement is governed everywhere by one
//! [`DiagonalsPolicy`].
//!
//! # Determinism
//!
//! Identical inputs produce identical structures, bit for bit: neighbor
//! expansion always follows [`Direction::COMPASS`] order, cost ties
//! break on cell index, and atlas targets are processed in flat-index
//! order. Serialized atlases are therefore reproducible artifacts.
//!
//! [`Direction::COMPASS`]: tilekit_core::Direction::COMPASS

mod atlas;
mod codec;
mod dijkstra;
mod direction_grid;
mod error;
mod policy;
mod task;

pub use atlas::DirectionAtlas;
pub use dijkstra::DijkstraField;
pub use direction_grid::DirectionGrid;
pub use error::AtlasError;
pub use policy::DiagonalsPolicy;
pub use task::{AtlasTask, CancelToken, TaskStep};
