//! The [`Tile`] and [`TileGrid`] capability traits.
//!
//! The toolkit never owns tiles. Callers supply any type exposing
//! coordinates, walkability and an optional weight, plus a collection
//! declaring its extents and major order. Everything else (extraction,
//! raycasting, pathfinding) is generic over these two traits.

use crate::geom::Point;
use crate::order::MajorOrder;

/// Capability set of a single grid cell.
///
/// Tile identity is coordinate-based: two tiles are "the same" when their
/// positions are equal, regardless of where the values live in memory, so
/// callers may wrap or copy tiles freely.
pub trait Tile {
    /// Column coordinate.
    fn x(&self) -> i32;

    /// Row coordinate.
    fn y(&self) -> i32;

    /// Whether the tile can be stood on / seen through.
    fn is_walkable(&self) -> bool;

    /// Positive traversal cost multiplier for weighted pathfinding.
    fn weight(&self) -> f32 {
        1.0
    }

    /// Position as a [`Point`].
    #[inline]
    fn pos(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

/// Capability set of a rectangular tile collection.
///
/// Invariant: every coordinate pair in `[0,width)×[0,height)` maps to
/// exactly one tile (the collection is never jagged), and
/// `tile_at_index` resolves flat indices in the declared
/// [`major_order`](TileGrid::major_order).
pub trait TileGrid {
    /// The caller's tile type.
    type Tile: Tile;

    /// Number of columns (the X extent).
    fn horizontal_extent(&self) -> i32;

    /// Number of rows (the Y extent).
    fn vertical_extent(&self) -> i32;

    /// Declared physical layout of the backing collection.
    fn major_order(&self) -> MajorOrder;

    /// Tile at flat index `idx` in the declared major order.
    ///
    /// `idx` must be below `width * height`; [`crate::tile_at`] is the
    /// validated entry point.
    fn tile_at_index(&self, idx: usize) -> &Self::Tile;
}

impl<G: TileGrid> TileGrid for &G {
    type Tile = G::Tile;

    fn horizontal_extent(&self) -> i32 {
        (**self).horizontal_extent()
    }

    fn vertical_extent(&self) -> i32 {
        (**self).vertical_extent()
    }

    fn major_order(&self) -> MajorOrder {
        (**self).major_order()
    }

    fn tile_at_index(&self, idx: usize) -> &Self::Tile {
        (**self).tile_at_index(idx)
    }
}
