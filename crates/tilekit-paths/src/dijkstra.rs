//! Single-source weighted distance fields.

use std::collections::BinaryHeap;

use tilekit_core::{Direction, GridError, Point, Tile, TileGrid, tile_at};

use crate::policy::DiagonalsPolicy;

/// Reference into the cost array, ordered for use in `BinaryHeap`.
///
/// Reversed so the max-heap pops the smallest cost first; ties fall back
/// to the flat index so pop order is deterministic.
#[derive(Clone, Copy, PartialEq)]
struct OpenRef {
    cost: f32,
    idx: usize,
}

impl Eq for OpenRef {}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A single-source weighted field over the whole grid.
///
/// For every reachable walkable tile the field records the cumulative
/// cost from the source and the direction of one step back toward it.
/// Immutable after construction; queries are O(1) (paths are O(length)).
#[derive(Debug, Clone)]
pub struct DijkstraField {
    width: i32,
    height: i32,
    source: Point,
    /// Cumulative cost per cell, row-major. `INFINITY` = unreachable.
    costs: Vec<f32>,
    /// One step toward the source, `None` at the source and on
    /// unreachable cells.
    toward: Vec<Direction>,
}

impl DijkstraField {
    /// Run a weighted shortest-path relaxation from `source`.
    ///
    /// Edge cost is the destination tile's weight times the policy's
    /// step multiplier. Neighbor expansion follows
    /// [`Direction::COMPASS`] and heap ties break on cell index, so the
    /// field is reproducible for identical inputs.
    ///
    /// Errors: `source` out of bounds, or not walkable.
    pub fn generate<G: TileGrid>(
        grid: &G,
        source: Point,
        policy: DiagonalsPolicy,
    ) -> Result<Self, GridError> {
        let src_tile = tile_at(grid, source)?;
        if !src_tile.is_walkable() {
            return Err(GridError::BlockedTile { pos: source });
        }

        let width = grid.horizontal_extent();
        let height = grid.vertical_extent();
        let len = width as usize * height as usize;
        let mut costs = vec![f32::INFINITY; len];
        let mut toward = vec![Direction::None; len];

        let idx = |p: Point| (p.y * width + p.x) as usize;

        costs[idx(source)] = 0.0;
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        open.push(OpenRef {
            cost: 0.0,
            idx: idx(source),
        });

        while let Some(OpenRef { cost, idx: ci }) = open.pop() {
            if cost > costs[ci] {
                // Stale entry superseded by a cheaper relaxation.
                continue;
            }
            let cp = Point::new(ci as i32 % width, ci as i32 / width);

            for dir in Direction::COMPASS {
                if dir.is_diagonal() && !policy.allows_diagonals() {
                    continue;
                }
                let np = cp + dir.delta();
                let Ok(nt) = tile_at(grid, np) else {
                    continue;
                };
                if !nt.is_walkable() {
                    continue;
                }
                let tentative = cost + nt.weight() * policy.step_cost(dir.is_diagonal());
                let ni = idx(np);
                if tentative < costs[ni] {
                    costs[ni] = tentative;
                    toward[ni] = dir.opposite();
                    open.push(OpenRef {
                        cost: tentative,
                        idx: ni,
                    });
                }
            }
        }

        Ok(Self {
            width,
            height,
            source,
            costs,
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

    /// The source tile position the field was built from.
    #[inline]
    pub fn source(&self) -> Point {
        self.source
    }

    /// Whether a path from `p` to the source exists.
    pub fn is_accessible(&self, p: Point) -> bool {
        self.idx_of(p)
            .map(|i| self.costs[i].is_finite())
            .unwrap_or(false)
    }

    /// Cumulative cost from the source to `p`, or `None` when `p` is
    /// unreachable or outside the field.
    pub fn cost_at(&self, p: Point) -> Option<f32> {
        self.idx_of(p).map(|i| self.costs[i]).filter(|c| c.is_finite())
    }

    /// One step from `p` toward the source, `Direction::None` at the
    /// source and on unreachable cells.
    pub fn direction_from(&self, p: Point) -> Direction {
        self.idx_of(p).map(|i| self.toward[i]).unwrap_or_default()
    }

    /// The next position on the path from `p` to the source.
    ///
    /// Returns `p` itself when `p` is the source or unreachable, so
    /// callers can branch on "no progress" without error handling.
    pub fn next_point_from(&self, p: Point) -> Point {
        p + self.direction_from(p).delta()
    }

    /// Resolve [`next_point_from`](Self::next_point_from) against a grid.
    ///
    /// The grid must have the dimensions the field was generated from.
    pub fn next_tile_from<'g, G: TileGrid>(
        &self,
        grid: &'g G,
        tile: &G::Tile,
    ) -> Result<&'g G::Tile, GridError> {
        self.check_dims(grid)?;
        tile_at(grid, self.next_point_from(tile.pos()))
    }

    /// The path from `p` to the source, following back-pointers.
    ///
    /// Empty when `p` is unreachable. When `p` is the source itself, the
    /// result holds the source once if either inclusion flag is set.
    pub fn path_from(&self, p: Point, include_start: bool, include_source: bool) -> Vec<Point> {
        if !self.is_accessible(p) {
            return Vec::new();
        }
        if p == self.source {
            return if include_start || include_source {
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
            if cur == self.source {
                if include_source {
                    path.push(cur);
                }
                return path;
            }
            path.push(cur);
        }
    }
}
