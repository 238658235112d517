//! Validated, layout-agnostic grid addressing.
//!
//! These free functions are the single validation point for coordinate
//! access: every downstream component indexes tiles through [`tile_at`]
//! (or checks with [`contains`] / clamps with [`clamp`] first), so the
//! row-major/column-major choice is absorbed here and geometry code is
//! written once.

use crate::error::GridError;
use crate::geom::Point;
use crate::tile::{Tile, TileGrid};

/// Whether `p` lies inside the grid's extents.
#[inline]
pub fn contains<G: TileGrid>(grid: &G, p: Point) -> bool {
    p.x >= 0 && p.y >= 0 && p.x < grid.horizontal_extent() && p.y < grid.vertical_extent()
}

/// Clamp each axis of `p` independently into `[0, extent - 1]`.
#[inline]
pub fn clamp<G: TileGrid>(grid: &G, p: Point) -> Point {
    Point::new(
        p.x.clamp(0, grid.horizontal_extent() - 1),
        p.y.clamp(0, grid.vertical_extent() - 1),
    )
}

/// The tile at `p`.
///
/// Out-of-range coordinates are a precondition violation: callers that
/// cannot guarantee bounds go through [`clamp`] first.
pub fn tile_at<G: TileGrid>(grid: &G, p: Point) -> Result<&G::Tile, GridError> {
    if !contains(grid, p) {
        return Err(GridError::OutOfBounds {
            pos: p,
            width: grid.horizontal_extent(),
            height: grid.vertical_extent(),
        });
    }
    let idx = grid
        .major_order()
        .flat_index(p, grid.horizontal_extent(), grid.vertical_extent());
    Ok(grid.tile_at_index(idx))
}

/// Whether the tile at `p` exists and is walkable.
#[inline]
pub fn walkable_at<G: TileGrid>(grid: &G, p: Point) -> bool {
    tile_at(grid, p).map(Tile::is_walkable).unwrap_or(false)
}
