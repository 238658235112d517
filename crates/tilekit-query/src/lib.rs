//! **tilekit-query**: synchronous spatial queries over a tile grid.
//!
//! Two query families, both pure functions over caller-owned grids:
//!
//! - **Extraction** ([`tiles_in_rectangle`], [`tiles_in_circle`]):
//!   bounded-region queries with silent clipping and optional wall
//!   filtering.
//! - **Raycasting** ([`line_of_sight`], [`cone_of_vision`]): directional
//!   queries with a deterministic 45° tie-break and a cone built as the
//!   deduplicated union of swept rays.
//!
//! Results are transient and recomputed per query; nothing here allocates
//! beyond its own output.

pub mod extract;
pub mod raycast;

pub use extract::{tiles_in_circle, tiles_in_rectangle};
pub use raycast::{Heading, cone_of_vision, line_of_sight};
