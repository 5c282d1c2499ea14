//! The fork/join driver.
//!
//! A run owns its shared state and predecessor map, builds a rayon pool with
//! large worker stacks and executes the root search task inside it. The root and every
//! descendant it forks are joined before `solve` returns.

use std::time::Instant;

use serde::Serialize;

use super::{
    observer::{NoopObserver, SearchObserver},
    predecessors::PredecessorMap,
    state::SharedState,
    stats::SearchStats,
    task::{SearchContext, SearchTask, TaskOutcome},
};
use crate::{
    config::SolverConfig,
    error::SolveError,
    graph::{Cell, Maze},
};

/// Stack for run workers: up to `max_fork_depth` nested joins live on it,
/// plus whatever work the worker steals while waiting in one.
const WORKER_STACK_SIZE: usize = 16 << 20;

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Start-to-goal path, or `None` if no goal is reachable.
    pub path: Option<Vec<Cell>>,
    /// Whether the run's termination flag was raised.
    pub terminated: bool,
    /// Run counters.
    pub stats: SearchStats,
}

impl Solution {
    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Depth-first solver that splits itself into concurrent subsearches at branch points.
pub struct ForkJoinSolver<'m, M: Maze + ?Sized> {
    maze: &'m M,
    config: SolverConfig,
    observer: &'m dyn SearchObserver,
}

impl<'m, M: Maze + ?Sized> ForkJoinSolver<'m, M> {
    /// Creates a solver over `maze`.
    pub fn new(maze: &'m M, config: SolverConfig) -> Self {
        Self {
            maze,
            config,
            observer: &NoopObserver,
        }
    }

    /// Routes search events to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'m dyn SearchObserver) -> Self {
        self.observer = observer;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Searches from `start`.
    ///
    /// # Errors
    /// Fails on an invalid configuration, an out-of-bounds start, a pool that
    /// cannot be built, or a broken predecessor chain. An unreachable goal is
    /// `Ok` with `path: None`.
    pub fn solve(&self, start: Cell) -> Result<Solution, SolveError> {
        self.config.validate()?;
        let cells = self.maze.cell_count();
        if start >= cells {
            return Err(SolveError::StartOutOfBounds { start, cells });
        }

        let span = tracing::debug_span!(
            "solve",
            start,
            cells,
            fork_after = self.config.fork_after,
            policy = ?self.config.visit_policy,
        );
        let _enter = span.enter();

        let state = SharedState::new(cells, self.config.visit_policy, self.config.max_live_tasks);
        let predecessors = PredecessorMap::new(cells);
        let ctx = SearchContext {
            maze: self.maze,
            start,
            state: &state,
            predecessors: &predecessors,
            config: &self.config,
            observer: self.observer,
        };

        let started = Instant::now();
        let mut builder = rayon::ThreadPoolBuilder::new()
            .stack_size(WORKER_STACK_SIZE)
            .thread_name(|i| format!("amazed-worker-{i}"));
        if let Some(threads) = self.config.threads {
            builder = builder.num_threads(threads);
        }
        let pool = builder.build()?;
        let outcome: TaskOutcome = pool.install(|| SearchTask::new(&ctx, start).compute());
        let stats = state.stats();

        match &outcome {
            Ok(Some(path)) => tracing::debug!(
                len = path.len(),
                expansions = stats.expansions,
                forks = stats.forks,
                elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
                "path found"
            ),
            Ok(None) => tracing::debug!(
                expansions = stats.expansions,
                visited = stats.visited,
                "no reachable goal"
            ),
            Err(err) => tracing::error!(%err, "search aborted"),
        }

        Ok(Solution {
            path: outcome?,
            terminated: state.is_terminated(),
            stats,
        })
    }
}

/// Searches `maze` from `start` with the given fork threshold and default
/// settings otherwise.
///
/// Returns `Ok(None)` when no goal is reachable from `start`.
pub fn solve<M: Maze + ?Sized>(
    maze: &M,
    start: Cell,
    fork_after: usize,
) -> Result<Option<Vec<Cell>>, SolveError> {
    let config = SolverConfig::default().with_fork_after(fork_after);
    Ok(ForkJoinSolver::new(maze, config).solve(start)?.path)
}
