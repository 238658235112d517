//! Directional queries: line of sight and cone of vision.
//!
//! A ray is walked with integer error accumulation only; the continuous
//! heading is quantized once (independently of the ray length), so the
//! visited prefix is identical for any sufficiently large `max_length`
//! and the 45° tie-break never depends on floating-point rounding.

use std::collections::HashSet;

use tilekit_core::{GridError, Point, Tile, TileGrid, tile_at};

/// Fixed-point scale applied when quantizing a continuous heading.
const HEADING_SCALE: f32 = 4096.0;

/// Angular resolution of the cone sweep, in degrees.
const CONE_STEP_DEG: f32 = 1.0;

/// A continuous direction, given as an angle or a 2-D vector.
///
/// Angles are degrees with 0° pointing east (`+x`) and increasing
/// counter-clockwise, so 90° is north (`-y` in screen coordinates).
/// Vectors are in grid space (`x` right, `y` down) and need not be
/// normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    Degrees(f32),
    Vector(f32, f32),
}

impl Heading {
    /// Direction components in grid space (y grows down).
    fn components(self) -> (f32, f32) {
        match self {
            Heading::Degrees(deg) => {
                let rad = deg.to_radians();
                (rad.cos(), -rad.sin())
            }
            Heading::Vector(x, y) => (x, y),
        }
    }

    /// Quantize to an integer direction vector. Magnitude is irrelevant;
    /// only the ratio drives the walk.
    fn quantize(self) -> (i32, i32) {
        let (ux, uy) = self.components();
        (
            (ux * HEADING_SCALE).round() as i32,
            (uy * HEADING_SCALE).round() as i32,
        )
    }
}

enum Walk {
    Continue,
    Stop,
}

/// Record one visited cell. Out-of-bounds stops the walk without
/// recording (the last in-bounds tile stays final); a wall is recorded
/// and then stops the walk.
fn visit<'g, G: TileGrid>(grid: &'g G, p: Point, out: &mut Vec<&'g G::Tile>) -> Walk {
    let Ok(tile) = tile_at(grid, p) else {
        return Walk::Stop;
    };
    out.push(tile);
    if tile.is_walkable() {
        Walk::Continue
    } else {
        Walk::Stop
    }
}

/// The line of sight from `origin` along `heading`.
///
/// Visits up to `max_length` tiles after the origin, stopping early when
/// a non-walkable tile is encountered (the blocking tile is included as
/// the last element) or when the ray leaves the grid (the last in-bounds
/// tile is the final element).
///
/// With `allow_diagonals = false`, a step that the walk would take
/// diagonally is decomposed into two cardinal steps; `favor_vertical`
/// picks which comes first (true → vertical). Each decomposed step
/// counts toward `max_length` and is checked against walls and bounds
/// individually.
///
/// `max_length = 0` is valid and yields at most the origin. A zero
/// heading vector degenerates the same way.
pub fn line_of_sight<G: TileGrid>(
    grid: &G,
    origin: Point,
    max_length: i32,
    heading: Heading,
    allow_diagonals: bool,
    favor_vertical: bool,
    include_origin: bool,
) -> Result<Vec<&G::Tile>, GridError> {
    if max_length < 0 {
        return Err(GridError::InvalidLength(max_length));
    }
    let origin_tile = tile_at(grid, origin)?;

    let mut out = Vec::new();
    if include_origin {
        out.push(origin_tile);
    }

    let (dxi, dyi) = heading.quantize();
    if dxi == 0 && dyi == 0 {
        return Ok(out);
    }
    let sx = dxi.signum();
    let sy = dyi.signum();
    let dx = dxi.abs();
    let dy = dyi.abs();
    let mut err = dx - dy;

    let mut cur = origin;
    let mut visited = 0;

    'walk: while visited < max_length {
        let e2 = 2 * err;
        let step_h = e2 > -dy;
        let step_v = e2 < dx;

        if step_h && step_v {
            err -= dy;
            err += dx;
            if allow_diagonals {
                cur = cur.shift(sx, sy);
                visited += 1;
                if let Walk::Stop = visit(grid, cur, &mut out) {
                    break 'walk;
                }
            } else {
                // Decompose: two cardinal steps, tie-break order fixed by
                // the favor flag.
                let steps = if favor_vertical {
                    [(0, sy), (sx, 0)]
                } else {
                    [(sx, 0), (0, sy)]
                };
                for (mx, my) in steps {
                    if visited >= max_length {
                        break 'walk;
                    }
                    cur = cur.shift(mx, my);
                    visited += 1;
                    if let Walk::Stop = visit(grid, cur, &mut out) {
                        break 'walk;
                    }
                }
            }
        } else if step_h {
            err -= dy;
            cur = cur.shift(sx, 0);
            visited += 1;
            if let Walk::Stop = visit(grid, cur, &mut out) {
                break 'walk;
            }
        } else {
            err += dx;
            cur = cur.shift(0, sy);
            visited += 1;
            if let Walk::Stop = visit(grid, cur, &mut out) {
                break 'walk;
            }
        }
    }

    Ok(out)
}

/// The cone of vision from `origin`: the deduplicated union of
/// line-of-sight rays swept over
/// `[direction_deg - opening_deg / 2, direction_deg + opening_deg / 2]`
/// at a fixed 1° resolution. Rays are walked with diagonals allowed; the
/// origin-inclusion rule is applied once to the union.
pub fn cone_of_vision<G: TileGrid>(
    grid: &G,
    origin: Point,
    length: i32,
    opening_deg: f32,
    direction_deg: f32,
    include_origin: bool,
) -> Result<Vec<&G::Tile>, GridError> {
    if length < 0 {
        return Err(GridError::InvalidLength(length));
    }
    if !(opening_deg >= 0.0) {
        return Err(GridError::InvalidAngle(opening_deg));
    }
    let origin_tile = tile_at(grid, origin)?;

    let mut seen: HashSet<Point> = HashSet::new();
    let mut out = Vec::new();
    if include_origin {
        seen.insert(origin);
        out.push(origin_tile);
    }

    let rays = ((opening_deg / CONE_STEP_DEG).ceil() as i32).max(1);
    for i in 0..=rays {
        let angle = direction_deg - opening_deg / 2.0 + opening_deg * i as f32 / rays as f32;
        let ray = line_of_sight(
            grid,
            origin,
            length,
            Heading::Degrees(angle),
            true,
            false,
            false,
        )?;
        for tile in ray {
            if seen.insert(tile.pos()) {
                out.push(tile);
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tilekit_core::{FlatTile, MajorOrder, VecGrid};

    fn open_grid(w: i32, h: i32) -> VecGrid<FlatTile> {
        VecGrid::new_with(w, h, MajorOrder::RowMajor, |p| FlatTile::walkable(p.x, p.y)).unwrap()
    }

    fn grid_with_walls(w: i32, h: i32, walls: &[(i32, i32)]) -> VecGrid<FlatTile> {
        VecGrid::new_with(w, h, MajorOrder::RowMajor, |p| {
            if walls.contains(&(p.x, p.y)) {
                FlatTile::wall(p.x, p.y)
            } else {
                FlatTile::walkable(p.x, p.y)
            }
        })
        .unwrap()
    }

    fn coords(tiles: &[&FlatTile]) -> Vec<(i32, i32)> {
        tiles.iter().map(|t| (t.x, t.y)).collect()
    }

    #[test]
    fn los_east_simple() {
        let g = open_grid(10, 10);
        let tiles =
            line_of_sight(&g, Point::new(2, 5), 4, Heading::Degrees(0.0), true, false, true)
                .unwrap();
        assert_eq!(
            coords(&tiles),
            vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5)]
        );
    }

    #[test]
    fn los_includes_blocking_tile_as_last() {
        let g = grid_with_walls(10, 10, &[(5, 5)]);
        let tiles =
            line_of_sight(&g, Point::new(2, 5), 8, Heading::Degrees(0.0), true, false, false)
                .unwrap();
        assert_eq!(coords(&tiles), vec![(3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn los_stops_at_grid_edge() {
        let g = open_grid(6, 6);
        // North from (3,2): (3,1), (3,0), then the ray leaves the grid.
        let tiles =
            line_of_sight(&g, Point::new(3, 2), 10, Heading::Degrees(90.0), true, false, false)
                .unwrap();
        assert_eq!(coords(&tiles), vec![(3, 1), (3, 0)]);
    }

    #[test]
    fn los_zero_length_returns_only_origin() {
        let g = open_grid(6, 6);
        let with = line_of_sight(&g, Point::new(3, 3), 0, Heading::Degrees(0.0), true, false, true)
            .unwrap();
        assert_eq!(coords(&with), vec![(3, 3)]);
        let without =
            line_of_sight(&g, Point::new(3, 3), 0, Heading::Degrees(0.0), true, false, false)
                .unwrap();
        assert!(without.is_empty());
    }

    #[test]
    fn los_prefix_deterministic_across_lengths() {
        let g = open_grid(40, 40);
        for heading in [
            Heading::Degrees(30.0),
            Heading::Degrees(-100.0),
            Heading::Degrees(200.5),
            Heading::Vector(3.0, 1.0),
        ] {
            let long = line_of_sight(&g, Point::new(20, 20), 15, heading, true, false, false)
                .unwrap();
            let short = line_of_sight(&g, Point::new(20, 20), 6, heading, true, false, false)
                .unwrap();
            assert_eq!(coords(&long)[..short.len()], coords(&short)[..]);
        }
    }

    #[test]
    fn los_45_degree_diagonal() {
        let g = open_grid(10, 10);
        let tiles =
            line_of_sight(&g, Point::new(2, 7), 3, Heading::Degrees(45.0), true, false, false)
                .unwrap();
        assert_eq!(coords(&tiles), vec![(3, 6), (4, 5), (5, 4)]);
    }

    #[test]
    fn los_45_degree_tiebreak_favor_vertical() {
        let g = open_grid(10, 10);
        let tiles =
            line_of_sight(&g, Point::new(2, 7), 4, Heading::Degrees(45.0), false, true, false)
                .unwrap();
        // Vertical first, then horizontal, alternating.
        assert_eq!(coords(&tiles), vec![(2, 6), (3, 6), (3, 5), (4, 5)]);
    }

    #[test]
    fn los_45_degree_tiebreak_favor_horizontal() {
        let g = open_grid(10, 10);
        let tiles =
            line_of_sight(&g, Point::new(2, 7), 4, Heading::Degrees(45.0), false, false, false)
                .unwrap();
        assert_eq!(coords(&tiles), vec![(3, 7), (3, 6), (4, 6), (4, 5)]);
    }

    #[test]
    fn los_no_diagonals_checks_intermediate_walls() {
        // The decomposed vertical step hits a wall before the horizontal
        // half of the diagonal is reached.
        let g = grid_with_walls(10, 10, &[(2, 6)]);
        let tiles =
            line_of_sight(&g, Point::new(2, 7), 6, Heading::Degrees(45.0), false, true, false)
                .unwrap();
        assert_eq!(coords(&tiles), vec![(2, 6)]);
    }

    #[test]
    fn los_vector_heading_matches_angle() {
        let g = open_grid(20, 20);
        let by_angle =
            line_of_sight(&g, Point::new(5, 10), 8, Heading::Degrees(0.0), true, false, false)
                .unwrap();
        let by_vector = line_of_sight(
            &g,
            Point::new(5, 10),
            8,
            Heading::Vector(1.0, 0.0),
            true,
            false,
            false,
        )
        .unwrap();
        assert_eq!(coords(&by_angle), coords(&by_vector));
    }

    #[test]
    fn los_negative_length_is_an_error() {
        let g = open_grid(5, 5);
        let err = line_of_sight(&g, Point::new(2, 2), -1, Heading::Degrees(0.0), true, false, true)
            .unwrap_err();
        assert_eq!(err, GridError::InvalidLength(-1));
    }

    #[test]
    fn cone_is_union_of_its_rays() {
        let g = grid_with_walls(20, 20, &[(12, 10), (12, 9)]);
        let origin = Point::new(8, 10);
        let cone = cone_of_vision(&g, origin, 6, 40.0, 0.0, false).unwrap();
        let cone_set: HashSet<(i32, i32)> = coords(&cone).into_iter().collect();

        // Every cone tile must be produced by at least one swept ray.
        let mut union: HashSet<(i32, i32)> = HashSet::new();
        let rays = 40;
        for i in 0..=rays {
            let angle = -20.0 + 40.0 * i as f32 / rays as f32;
            let ray = line_of_sight(
                &g,
                origin,
                6,
                Heading::Degrees(angle),
                true,
                false,
                false,
            )
            .unwrap();
            union.extend(coords(&ray));
        }
        assert_eq!(cone_set, union);
    }

    #[test]
    fn cone_has_no_duplicates() {
        let g = open_grid(15, 15);
        let cone = cone_of_vision(&g, Point::new(7, 7), 5, 360.0, 0.0, true).unwrap();
        let set: HashSet<(i32, i32)> = coords(&cone).into_iter().collect();
        assert_eq!(set.len(), cone.len());
        assert!(set.contains(&(7, 7)));
    }

    #[test]
    fn cone_origin_rule_applied_once() {
        let g = open_grid(15, 15);
        let without = cone_of_vision(&g, Point::new(7, 7), 4, 90.0, 180.0, false).unwrap();
        assert!(!coords(&without).contains(&(7, 7)));
        let with = cone_of_vision(&g, Point::new(7, 7), 4, 90.0, 180.0, true).unwrap();
        assert_eq!(with.len(), without.len() + 1);
    }

    #[test]
    fn cone_zero_opening_is_a_single_ray() {
        let g = open_grid(15, 15);
        let cone = cone_of_vision(&g, Point::new(7, 7), 5, 0.0, 0.0, false).unwrap();
        let ray =
            line_of_sight(&g, Point::new(7, 7), 5, Heading::Degrees(0.0), true, false, false)
                .unwrap();
        assert_eq!(coords(&cone), coords(&ray));
    }

    #[test]
    fn cone_negative_opening_is_an_error() {
        let g = open_grid(5, 5);
        let err = cone_of_vision(&g, Point::new(2, 2), 3, -10.0, 0.0, false).unwrap_err();
        assert_eq!(err, GridError::InvalidAngle(-10.0));
    }
}
