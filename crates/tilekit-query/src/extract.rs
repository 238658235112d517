//! Bounded-region extraction queries.
//!
//! Pure, synchronous, allocation-bounded: build a shape around a center
//! tile, clip it to the grid silently, and filter by walkability. Output
//! ordering is unspecified; callers (and tests) compare result sets.

use tilekit_core::{GridError, Point, Tile, TileGrid, dist_sq, tile_at};

/// Tiles in the axis-aligned rectangle centered on `center` with the
/// given half-extents per side.
///
/// Half-extents `(hx, hy)` span `[center.x - hx, center.x + hx]` by
/// `[center.y - hy, center.y + hy]`, so a `(6, 4)` rectangle covers a
/// 13×9 block. The rectangle is clipped to the grid bounds silently;
/// partially out-of-bounds rectangles are not an error, the excess is
/// dropped.
///
/// `include_center` keeps or drops the center tile itself;
/// `include_walls` keeps or drops non-walkable tiles.
///
/// Errors: `center` out of bounds, or a non-positive half-extent.
pub fn tiles_in_rectangle<G: TileGrid>(
    grid: &G,
    center: Point,
    half_extents: (i32, i32),
    include_center: bool,
    include_walls: bool,
) -> Result<Vec<&G::Tile>, GridError> {
    let (hx, hy) = half_extents;
    if hx <= 0 || hy <= 0 {
        return Err(GridError::InvalidSize {
            width: hx,
            height: hy,
        });
    }
    tile_at(grid, center)?;

    let x0 = (center.x - hx).max(0);
    let x1 = (center.x + hx).min(grid.horizontal_extent() - 1);
    let y0 = (center.y - hy).max(0);
    let y1 = (center.y + hy).min(grid.vertical_extent() - 1);

    let mut out = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)) as usize);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x, y);
            if !include_center && p == center {
                continue;
            }
            let tile = tile_at(grid, p)?;
            if include_walls || tile.is_walkable() {
                out.push(tile);
            }
        }
    }
    Ok(out)
}

/// Tiles in the Euclidean disc of the given radius around `center`.
///
/// Same clipping and filtering rules as [`tiles_in_rectangle`].
pub fn tiles_in_circle<G: TileGrid>(
    grid: &G,
    center: Point,
    radius: i32,
    include_center: bool,
    include_walls: bool,
) -> Result<Vec<&G::Tile>, GridError> {
    if radius <= 0 {
        return Err(GridError::InvalidSize {
            width: radius,
            height: radius,
        });
    }
    tile_at(grid, center)?;

    let r_sq = radius as i64 * radius as i64;
    let x0 = (center.x - radius).max(0);
    let x1 = (center.x + radius).min(grid.horizontal_extent() - 1);
    let y0 = (center.y - radius).max(0);
    let y1 = (center.y + radius).min(grid.vertical_extent() - 1);

    let mut out = Vec::new();
    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Point::new(x, y);
            if dist_sq(p, center) > r_sq {
                continue;
            }
            if !include_center && p == center {
                continue;
            }
            let tile = tile_at(grid, p)?;
            if include_walls || tile.is_walkable() {
                out.push(tile);
            }
        }
    }
    Ok(out)
}
