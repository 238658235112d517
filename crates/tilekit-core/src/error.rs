//! Precondition-violation errors shared across the toolkit.

use crate::geom::Point;

/// An error raised for precondition violations on grid queries.
///
/// Unreachability is never an error; pathfinding structures represent it
/// as data. These variants cover the cases a caller got wrong: indexing
/// outside the grid without clamping first, non-positive query sizes, and
/// pairing a stored structure with a grid of different dimensions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Coordinates outside `[0,width)×[0,height)` reached an indexing
    /// operation without going through `clamp` first.
    #[error("coordinates {pos} outside {width}x{height} grid")]
    OutOfBounds { pos: Point, width: i32, height: i32 },

    /// A query size with a non-positive extent.
    #[error("invalid query size {width}x{height}: extents must be positive")]
    InvalidSize { width: i32, height: i32 },

    /// A negative ray or path length.
    #[error("invalid length {0}: must be non-negative")]
    InvalidLength(i32),

    /// A negative angular opening.
    #[error("invalid opening angle {0}: must be non-negative")]
    InvalidAngle(f32),

    /// A stored structure was queried against a grid of different
    /// dimensions than the one it was generated from.
    #[error("grid is {got_width}x{got_height}, structure was built for {want_width}x{want_height}")]
    DimensionMismatch {
        want_width: i32,
        want_height: i32,
        got_width: i32,
        got_height: i32,
    },

    /// A generation source or target tile that is not walkable.
    #[error("tile at {pos} is not walkable")]
    BlockedTile { pos: Point },

    /// A backing collection whose length does not match the declared
    /// extents.
    #[error("backing collection holds {got} tiles, extents declare {expected}")]
    BadTileCount { expected: usize, got: usize },
}
