//! All-pairs next-step atlas.

use log::debug;
use tilekit_core::{Direction, GridError, MajorOrder, Point, Tile, TileGrid, tile_at};

use crate::error::AtlasError;
use crate::policy::DiagonalsPolicy;
use crate::task::{AtlasTask, CancelToken, TaskStep};

/// Next-step directions between every pair of walkable tiles.
///
/// One breadth-first field per walkable target, stacked. After the
/// (expensive) build, any "which way from A to B" query is O(1) and
/// walking out a full path is O(length). The atlas is immutable and
/// detached from the grid it was generated from; queries that take a
/// grid verify its dimensions first.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionAtlas {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) order: MajorOrder,
    pub(crate) policy: DiagonalsPolicy,
    /// Walkability per cell, indexed by `order`.
    pub(crate) walkable: Vec<bool>,
    /// Cell index -> field slot, `u32::MAX` on non-walkable cells.
    pub(crate) slot: Vec<u32>,
    /// Per walkable target (ascending cell index), one next-step
    /// direction per source cell.
    pub(crate) fields: Vec<Vec<Direction>>,
}

impl DirectionAtlas {
    /// Generate the atlas in one blocking call.
    ///
    /// Equivalent to driving an [`AtlasTask`] to completion without
    /// observing progress.
    pub fn generate<G: TileGrid>(grid: &G, policy: DiagonalsPolicy) -> Self {
        let mut task = AtlasTask::new(grid, policy);
        loop {
            match task.step() {
                TaskStep::Pending(t, _) => task = t,
                TaskStep::Complete(atlas) => return atlas,
            }
        }
    }

    /// Generate the atlas, reporting progress and honoring cancellation.
    ///
    /// `progress` receives a strictly increasing fraction after each
    /// completed target and is called with `1.0` exactly once, on
    /// success. The token is polled between targets; a cancelled run
    /// returns [`AtlasError::Cancelled`] and drops all partial work.
    pub fn generate_with<G: TileGrid>(
        grid: &G,
        policy: DiagonalsPolicy,
        mut progress: impl FnMut(f32),
        cancel: &CancelToken,
    ) -> Result<Self, AtlasError> {
        let mut task = AtlasTask::new(grid, policy);
        let total = task.target_count();
        loop {
            if cancel.is_cancelled() {
                debug!(
                    "atlas generation cancelled after {}/{total} targets",
                    task.completed()
                );
                return Err(AtlasError::Cancelled);
            }
            match task.step() {
                TaskStep::Pending(t, p) => {
                    progress(p);
                    task = t;
                }
                TaskStep::Complete(atlas) => {
                    debug!("atlas generation complete: {total} targets");
                    progress(1.0);
                    return Ok(atlas);
                }
            }
        }
    }

    /// Grid width the atlas was generated for.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height the atlas was generated for.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Declared layout of the source grid.
    #[inline]
    pub fn major_order(&self) -> MajorOrder {
        self.order
    }

    /// Diagonal policy the atlas was generated under.
    #[inline]
    pub fn policy(&self) -> DiagonalsPolicy {
        self.policy
    }

    /// Number of walkable tiles (= stored fields).
    pub fn target_count(&self) -> usize {
        self.fields.len()
    }

    fn idx_of(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some(self.order.flat_index(p, self.width, self.height))
        } else {
            None
        }
    }

    /// The field slot for `target`, when it is in bounds and walkable.
    fn field_for(&self, target: Point) -> Option<&[Direction]> {
        let ti = self.idx_of(target)?;
        let s = self.slot[ti];
        if s == u32::MAX {
            return None;
        }
        Some(&self.fields[s as usize])
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

    /// Whether a path from `source` to `target` exists.
    ///
    /// A walkable tile always has a path to itself.
    pub fn has_path(&self, source: Point, target: Point) -> bool {
        let Some(si) = self.idx_of(source) else {
            return false;
        };
        if !self.walkable[si] {
            return false;
        }
        let Some(field) = self.field_for(target) else {
            return false;
        };
        source == target || field[si] != Direction::None
    }

    /// One step from `source` toward `target`.
    ///
    /// `Direction::None` when either endpoint is invalid, no path
    /// exists, or `source` already is the target.
    pub fn direction(&self, source: Point, target: Point) -> Direction {
        match (self.idx_of(source), self.field_for(target)) {
            (Some(si), Some(field)) if self.walkable[si] => field[si],
            _ => Direction::None,
        }
    }

    /// The next position on the path from `source` to `target`.
    ///
    /// Returns `source` itself when no step can be made.
    pub fn next_point(&self, source: Point, target: Point) -> Point {
        source + self.direction(source, target).delta()
    }

    /// Resolve [`next_point`](Self::next_point) against a grid.
    pub fn next_tile<'g, G: TileGrid>(
        &self,
        grid: &'g G,
        source: &G::Tile,
        target: &G::Tile,
    ) -> Result<&'g G::Tile, GridError> {
        self.check_dims(grid)?;
        tile_at(grid, self.next_point(source.pos(), target.pos()))
    }

    /// The full path from `source` to `target`, endpoints included.
    ///
    /// Empty when no path exists; `[source]` when they coincide.
    pub fn path(&self, source: Point, target: Point) -> Vec<Point> {
        if !self.has_path(source, target) {
            return Vec::new();
        }
        let mut path = vec![source];
        let mut cur = source;
        while cur != target {
            cur = self.next_point(cur, target);
            path.push(cur);
        }
        path
    }
}
