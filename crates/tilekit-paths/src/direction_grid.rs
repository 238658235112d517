//! Single-target unweighted next-step grids.

use std::collections::VecDeque;

use tilekit_core::{Direction, GridError, Point, Tile, TileGrid, tile_at, walkable_at};

use crate::policy::DiagonalsPolicy;

/// Sentinel hop count meaning "not reached".
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Breadth-first relaxation from `target`, writing hop counts into
/// `dist` and next-step directions (toward the target) into `toward`.
///
/// Both slices must be pre-filled with their sentinel values. Expansion
/// follows [`Direction::COMPASS`], so results are reproducible. The
/// queue is caller-owned scratch so atlas generation can reuse one
/// allocation across targets.
pub(crate) fn relax_toward<G: TileGrid>(
    grid: &G,
    target: Point,
    policy: DiagonalsPolicy,
    idx: impl Fn(Point) -> usize,
    dist: &mut [i32],
    toward: &mut [Direction],
    queue: &mut VecDeque<Point>,
) {
    queue.clear();
    dist[idx(target)] = 0;
    queue.push_back(target);

    while let Some(cp) = queue.pop_front() {
        let d = dist[idx(cp)];
        for dir in Direction::COMPASS {
            if dir.is_diagonal() && !policy.allows_diagonals() {
                continue;
            }
            let np = cp + dir.delta();
            if !walkable_at(grid, np) {
                continue;
            }
            let ni = idx(np);
            if dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = d + 1;
            toward[ni] = dir.opposite();
            queue.push_back(np);
        }
    }
}

/// A single-target unweighted next-step grid.
///
/// For every tile, the direction to move to get one step closer (by
/// shortest hop count) to one fixed target. Smaller and cheaper than a
/// [`DijkstraField`](crate::DijkstraField) when weights are irrelevant.
#[derive(Debug, Clone)]
pub struct DirectionGrid {
    width: i32,
    height: i32,
    target: Point,
    /// Hop count per cell, row-major. [`UNREACHABLE`] = not reached.
    dist: Vec<i32>,
    /// One step toward the target, `None` at the target and on
    /// unreachable cells.
    toward: Vec<Direction>,
}

impl DirectionGrid {
    /// Run an unweighted breadth-first relaxation from `target`.
    ///
    /// Diagonal steps are permitted when the policy allows them; the
    /// uniform and Euclidean policies produce identical grids because
    /// hop counts ignore costs.
    ///
    /// Errors: `target` out of bounds, or not walkable.
    pub fn generate<G: TileGrid>(
        grid: &G,
        target: Point,
        policy: DiagonalsPolicy,
    ) -> Result<Self, GridError> {
        let target_tile = tile_at(grid, target)?;
        if !target_tile.is_walkable() {
            return Err(GridError::BlockedTile { pos: target });
        }

        let width = grid.horizontal_extent();
        let height = grid.vertical_extent();
        let len = width as usize * height as usize;
        let mut dist = vec![UNREACHABLE; len];
        let mut toward = vec![Direction::None; len];
        let mut queue = VecDeque::new();

        relax_toward(
            grid,
            target,
            policy,
            |p| (p.y * width + p.x) as usize,
            &mut dist,
            &mut toward,
            &mut queue,
        );

        Ok(Self {
            width,
            height,
            target,
            dist,
            toward,
        })
    }

    fn idx_of(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y * self.width + p.x) as usize)
        } else {
            None
        }
    }

    fn check_dims<G: TileGrid>(&self, grid: &G) -> Result<(), GridError> {
        if grid.horizontal_extent() != self.width || grid.vertical_extent() != self.height {
            return Err(GridError::DimensionMismatch {
                want_width: self.width,
                want_height: self.height,
                got_width: grid.horizontal_extent(),
                got_height: grid.vertical_extent(),
            });
        }
        Ok(())
    }

    /// The target tile position the grid was built from.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Whether a path from `p` to the target exists.
    pub fn is_accessible(&self, p: Point) -> bool {
        self.idx_of(p)
            .map(|i| self.dist[i] != UNREACHABLE)
            .unwrap_or(false)
    }

    /// Hop count from `p` to the target, or `None` when unreachable.
    pub fn distance_at(&self, p: Point) -> Option<i32> {
        self.idx_of(p)
            .map(|i| self.dist[i])
            .filter(|&d| d != UNREACHABLE)
    }

    /// One step from `p` toward the target, `Direction::None` at the
    /// target and on unreachable cells.
    pub fn direction_from(&self, p: Point) -> Direction {
        self.idx_of(p).map(|i| self.toward[i]).unwrap_or_default()
    }

    /// The next position on the path from `p` to the target.
    ///
    /// Returns `p` itself when `p` is the target or unreachable.
    pub fn next_point_from(&self, p: Point) -> Point {
        p + self.direction_from(p).delta()
    }

    /// Resolve [`next_point_from`](Self::next_point_from) against a grid.
    pub fn next_tile_from<'g, G: TileGrid>(
        &self,
        grid: &'g G,
        tile: &G::Tile,
    ) -> Result<&'g G::Tile, GridError> {
        self.check_dims(grid)?;
        tile_at(grid, self.next_point_from(tile.pos()))
    }

    /// The path from `p` to the target, following next-step directions.
    ///
    /// Empty when `p` is unreachable. When `p` is the target itself, the
    /// result holds the target once if either inclusion flag is set.
    pub fn path_to_target(&self, p: Point, include_start: bool, include_target: bool) -> Vec<Point> {
        if !self.is_accessible(p) {
            return Vec::new();
        }
        if p == self.target {
            return if include_start || include_target {
                vec![p]
            } else {
                Vec::new()
            };
        }

        let mut path = Vec::new();
        if include_start {
            path.push(p);
        }
        let mut cur = p;
        loop {
            cur = self.next_point_from(cur);
            if cur == self.target {
                if include_target {
                    path.push(cur);
                }
                return path;
            }
            path.push(cur);
        }
    }

    /// The path from the target out to `p`: [`path_to_target`]
    /// reversed, with its own inclusion flags.
    ///
    /// [`path_to_target`]: Self::path_to_target
    pub fn path_from_target(&self, p: Point, include_target: bool, include_start: bool) -> Vec<Point> {
        let mut path = self.path_to_target(p, include_start, include_target);
        path.reverse();
        path
    }
}
