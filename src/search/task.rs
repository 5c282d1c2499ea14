//! The search task: an iterative DFS over a private frontier that forks child
//! tasks at branch points.
//!
//! A task rooted at `root`:
//! 1. returns empty if `root` is already visited;
//! 2. pops cells until its frontier is empty or the run is terminated;
//! 3. on popping a goal, raises the termination flag and, if it was first,
//!    reconstructs the path from the run's start;
//! 4. expands each cell it enters, either pushing the unvisited neighbours onto
//!    its own frontier or, at an eligible branch point, forking one child per
//!    neighbour and joining them with `find_map_any`.
//!
//! Each fork/join block nests a join on the worker stack, so forking stops at
//! `max_fork_depth` nested blocks; deeper tasks expand sequentially.
//!
//! Joining is the only suspension point. A child that finds a path (or hits a
//! reconstruction defect) completes the join without waiting for the result of
//! its siblings; siblings already running observe the termination flag at their
//! next loop check.

use rayon::prelude::*;

use super::{
    observer::SearchObserver,
    path::reconstruct,
    predecessors::PredecessorMap,
    state::{ForkPermit, SharedState, Visit},
    stats::StatCounters,
};
use crate::{
    config::SolverConfig,
    error::ReconstructionError,
    graph::{Cell, Maze},
};

/// Result of one task: a path, empty, or an invariant violation.
pub(crate) type TaskOutcome = Result<Option<Vec<Cell>>, ReconstructionError>;

/// Everything tasks of one run share.
pub(crate) struct SearchContext<'a, M: Maze + ?Sized> {
    pub(crate) maze: &'a M,
    pub(crate) start: Cell,
    pub(crate) state: &'a SharedState,
    pub(crate) predecessors: &'a PredecessorMap,
    pub(crate) config: &'a SolverConfig,
    pub(crate) observer: &'a dyn SearchObserver,
}

/// One unit of fork/join work.
pub(crate) struct SearchTask<'a, M: Maze + ?Sized> {
    ctx: &'a SearchContext<'a, M>,
    root: Cell,
    /// Fork/join blocks enclosing this task.
    depth: usize,
    frontier: Vec<Cell>,
    /// Sequential expansions since creation or since the last fork.
    steps: usize,
}

impl<'a, M: Maze + ?Sized> SearchTask<'a, M> {
    pub(crate) fn new(ctx: &'a SearchContext<'a, M>, root: Cell) -> Self {
        Self::at_depth(ctx, root, 0)
    }

    fn at_depth(ctx: &'a SearchContext<'a, M>, root: Cell, depth: usize) -> Self {
        Self {
            ctx,
            root,
            depth,
            frontier: Vec::with_capacity(64),
            steps: 0,
        }
    }

    pub(crate) fn compute(mut self) -> TaskOutcome {
        let ctx = self.ctx;
        if ctx.state.visited().is_visited(self.root) {
            StatCounters::bump(&ctx.state.counters.skipped);
            return Ok(None);
        }

        let player = ctx.maze.new_player(self.root);
        self.frontier.push(self.root);

        while !ctx.state.is_terminated() {
            let Some(cell) = self.frontier.pop() else {
                break;
            };

            if ctx.maze.has_goal(cell) {
                ctx.maze.move_player(player, cell);
                return self.report_goal(cell);
            }

            let visit = ctx.state.enter(cell);
            if !visit.expands() {
                continue;
            }
            if visit == Visit::Duplicate {
                ctx.observer.on_duplicate(cell);
            }
            ctx.maze.move_player(player, cell);
            ctx.observer.on_expand(cell);

            let branches = self.unvisited_neighbors(cell);
            if self.may_fork(branches.len()) {
                let permit = if self.depth < ctx.config.max_fork_depth {
                    ctx.state.tasks().try_reserve(branches.len())
                } else {
                    None
                };
                if let Some(permit) = permit {
                    if let Some(path) = self.fork_join(cell, &branches, permit)? {
                        return Ok(Some(path));
                    }
                    self.steps = 0;
                    continue;
                }
                StatCounters::bump(&ctx.state.counters.fork_fallbacks);
                ctx.observer.on_fallback(cell, branches.len());
            }

            for &next in &branches {
                ctx.predecessors.record(next, cell);
                self.frontier.push(next);
            }
            self.steps = self.steps.saturating_add(1);
        }

        Ok(None)
    }

    /// Distinct neighbours of `cell` not yet in the shared visited set.
    fn unvisited_neighbors(&self, cell: Cell) -> Vec<Cell> {
        let visited = self.ctx.state.visited();
        let mut out: Vec<Cell> = self
            .ctx
            .maze
            .neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| !visited.is_visited(n))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn may_fork(&self, branches: usize) -> bool {
        let config = self.ctx.config;
        config.fork_after != usize::MAX
            && branches >= config.min_branches
            && self.steps >= config.fork_after
    }

    fn fork_join(&self, cell: Cell, branches: &[Cell], permit: ForkPermit<'_>) -> TaskOutcome {
        let ctx = self.ctx;
        for &child in branches {
            ctx.predecessors.record(child, cell);
        }
        StatCounters::bump(&ctx.state.counters.forks);
        ctx.observer.on_fork(cell, branches);

        let depth = self.depth + 1;
        let outcome = branches
            .par_iter()
            .zip(permit.split())
            .find_map_any(|(&child, slot)| {
                StatCounters::bump(&ctx.state.counters.tasks_spawned);
                let result = SearchTask::at_depth(ctx, child, depth).compute();
                drop(slot);
                match result {
                    Ok(None) => None,
                    found_or_failed => Some(found_or_failed),
                }
            })
            .unwrap_or(Ok(None));

        ctx.observer.on_join(cell, matches!(outcome, Ok(Some(_))));
        outcome
    }

    fn report_goal(&self, goal: Cell) -> TaskOutcome {
        let ctx = self.ctx;
        StatCounters::bump(&ctx.state.counters.goal_signals);
        if !ctx.state.terminate() {
            // Another task won; its path is the run's answer.
            return Ok(None);
        }
        ctx.observer.on_goal(goal);
        reconstruct(ctx.start, goal, ctx.predecessors).map(Some)
    }
}
