//! Observation hooks for search runs.
//!
//! Every callback defaults to a no-op. Hooks run on rayon workers, concurrently,
//! and must not block.

use crate::graph::Cell;

/// Receives search lifecycle events.
pub trait SearchObserver: Sync {
    /// A task is about to expand `cell`.
    fn on_expand(&self, _cell: Cell) {}

    /// `cell` is being expanded by more than one task (check-then-insert race).
    fn on_duplicate(&self, _cell: Cell) {}

    /// `parent` forked one task per cell in `children`.
    fn on_fork(&self, _parent: Cell, _children: &[Cell]) {}

    /// The fork/join block at `parent` completed; `found` if a child returned a path.
    fn on_join(&self, _parent: Cell, _found: bool) {}

    /// A fork point expanded sequentially because the live-task cap or the fork
    /// depth limit was reached.
    fn on_fallback(&self, _parent: Cell, _branches: usize) {}

    /// The run's winning task reached `goal`.
    fn on_goal(&self, _goal: Cell) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_expand(&self, cell: Cell) {
        tracing::trace!(cell, "expand");
    }

    fn on_duplicate(&self, cell: Cell) {
        tracing::debug!(cell, "duplicate expansion");
    }

    fn on_fork(&self, parent: Cell, children: &[Cell]) {
        tracing::trace!(parent, children = ?children, "fork");
    }

    fn on_join(&self, parent: Cell, found: bool) {
        tracing::trace!(parent, found, "join");
    }

    fn on_fallback(&self, parent: Cell, branches: usize) {
        tracing::debug!(parent, branches, "fork refused, continuing sequentially");
    }

    fn on_goal(&self, goal: Cell) {
        tracing::debug!(goal, "goal reached");
    }
}
