//! Stepwise atlas generation.
//!
//! All-pairs generation is O(walkable²) and can stall a frame loop on
//! large maps, so the work is split into resumable steps: one
//! breadth-first relaxation per walkable target. Callers drive the task
//! from wherever suits them (a loop, an async task yielding between
//! steps) and observe progress after each step.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::trace;
use tilekit_core::{Direction, MajorOrder, Point, Tile, TileGrid};

use crate::atlas::DirectionAtlas;
use crate::direction_grid::{UNREACHABLE, relax_toward};
use crate::policy::DiagonalsPolicy;

/// Shared cancellation flag for long-running atlas generation.
///
/// Clones observe the same flag. Signaling is sticky; a cancelled token
/// stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, unsignaled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Safe to call from another thread.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been signaled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The outcome of one [`AtlasTask::step`].
pub enum TaskStep<'g, G: TileGrid> {
    /// More targets remain; resume with the returned task. The `f32` is
    /// the fraction of targets completed so far, in `(0.0, 1.0)`.
    Pending(AtlasTask<'g, G>, f32),
    /// The last target finished; the atlas is ready.
    Complete(DirectionAtlas),
}

/// An in-progress all-pairs atlas generation.
///
/// Each [`step`](Self::step) consumes the task, relaxes exactly one
/// walkable target, and either hands the task back or yields the
/// finished [`DirectionAtlas`]. Targets are processed in the grid's
/// flat-index order, so two runs over the same grid produce identical
/// atlases.
pub struct AtlasTask<'g, G: TileGrid> {
    grid: &'g G,
    policy: DiagonalsPolicy,
    width: i32,
    height: i32,
    order: MajorOrder,
    /// Walkability per cell, indexed by the grid's declared order.
    walkable: Vec<bool>,
    /// Flat indices of walkable tiles, ascending.
    targets: Vec<usize>,
    next: usize,
    /// One next-step field per completed target, in target order.
    fields: Vec<Vec<Direction>>,
    // Scratch reused across targets.
    dist: Vec<i32>,
    queue: VecDeque<Point>,
}

impl<'g, G: TileGrid> AtlasTask<'g, G> {
    /// Set up generation over every walkable tile of `grid`.
    pub fn new(grid: &'g G, policy: DiagonalsPolicy) -> Self {
        let width = grid.horizontal_extent();
        let height = grid.vertical_extent();
        let order = grid.major_order();
        let len = width as usize * height as usize;

        let walkable: Vec<bool> = (0..len)
            .map(|i| grid.tile_at_index(i).is_walkable())
            .collect();
        let targets: Vec<usize> = (0..len).filter(|&i| walkable[i]).collect();
        trace!(
            "atlas task over {width}x{height} grid: {} walkable targets",
            targets.len()
        );

        Self {
            grid,
            policy,
            width,
            height,
            order,
            walkable,
            fields: Vec::with_capacity(targets.len()),
            targets,
            next: 0,
            dist: vec![UNREACHABLE; len],
            queue: VecDeque::new(),
        }
    }

    /// Targets completed so far, out of [`target_count`](Self::target_count).
    pub fn completed(&self) -> usize {
        self.next
    }

    /// Total walkable targets this task will process.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    /// Relax one target.
    ///
    /// Returns `Complete` the moment the final target finishes, so a
    /// driver never observes full progress on a run that can still be
    /// cancelled.
    pub fn step(mut self) -> TaskStep<'g, G> {
        if self.next >= self.targets.len() {
            // Degenerate grid with no walkable tiles.
            return TaskStep::Complete(self.into_atlas());
        }

        let target_idx = self.targets[self.next];
        let target = self.order.point_at(target_idx, self.width, self.height);

        self.dist.fill(UNREACHABLE);
        let mut toward = vec![Direction::None; self.dist.len()];
        let (order, width, height) = (self.order, self.width, self.height);
        relax_toward(
            self.grid,
            target,
            self.policy,
            |p| order.flat_index(p, width, height),
            &mut self.dist,
            &mut toward,
            &mut self.queue,
        );
        self.fields.push(toward);
        self.next += 1;
        trace!(
            "atlas target {target} done ({}/{})",
            self.next,
            self.targets.len()
        );

        if self.next == self.targets.len() {
            TaskStep::Complete(self.into_atlas())
        } else {
            let progress = self.next as f32 / self.targets.len() as f32;
            TaskStep::Pending(self, progress)
        }
    }

    fn into_atlas(self) -> DirectionAtlas {
        let mut slot = vec![u32::MAX; self.walkable.len()];
        let mut n = 0u32;
        for (i, &w) in self.walkable.iter().enumerate() {
            if w {
                slot[i] = n;
                n += 1;
            }
        }
        DirectionAtlas {
            width: self.width,
            height: self.height,
            order: self.order,
            policy: self.policy,
            walkable: self.walkable,
            slot,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilekit_core::{FlatTile, VecGrid};

    fn walled_grid() -> VecGrid<FlatTile> {
        VecGrid::new_with(5, 5, MajorOrder::RowMajor, |p| {
            if p.x == 2 && p.y != 4 {
                FlatTile::wall(p.x, p.y)
            } else {
                FlatTile::walkable(p.x, p.y)
            }
        })
        .unwrap()
    }

    #[test]
    fn progress_is_monotone_and_never_reports_one() {
        let g = walled_grid();
        let mut task = AtlasTask::new(&g, DiagonalsPolicy::Uniform);
        let total = task.target_count();
        assert_eq!(total, 21);

        let mut last = 0.0;
        let mut steps = 0;
        let atlas = loop {
            match task.step() {
                TaskStep::Pending(t, p) => {
                    assert!(p > last && p < 1.0);
                    last = p;
                    steps += 1;
                    task = t;
                }
                TaskStep::Complete(atlas) => {
                    steps += 1;
                    break atlas;
                }
            }
        };
        assert_eq!(steps, total);
        assert!(atlas.has_path(Point::new(0, 0), Point::new(4, 4)));
    }

    #[test]
    fn no_walkable_tiles_completes_immediately() {
        let g = VecGrid::new_with(3, 3, MajorOrder::RowMajor, |p| FlatTile::wall(p.x, p.y))
            .unwrap();
        let task = AtlasTask::new(&g, DiagonalsPolicy::Uniform);
        assert_eq!(task.target_count(), 0);
        match task.step() {
            TaskStep::Complete(atlas) => {
                assert!(!atlas.has_path(Point::new(0, 0), Point::new(1, 1)));
            }
            TaskStep::Pending(..) => panic!("empty task must complete on first step"),
        }
    }

    #[test]
    fn cancel_token_is_sticky_and_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(clone.is_cancelled());
    }
}
