//! Run statistics.

use core::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;
use serde::Serialize;

/// Counters gathered during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Cells expanded (neighbours computed), duplicates included.
    pub expansions: usize,
    /// Expansions of a cell some other task was expanding too. Always 0 under
    /// [`VisitPolicy::Atomic`](crate::VisitPolicy::Atomic).
    pub duplicate_expansions: usize,
    /// Pops (and fork roots) skipped because the cell was already visited.
    pub skipped: usize,
    /// Fork/join blocks executed.
    pub forks: usize,
    /// Child tasks actually started by forks. Children a join discards after
    /// another child finished first are not counted.
    pub tasks_spawned: usize,
    /// Fork points that expanded sequentially because the task cap or the fork
    /// depth limit was reached.
    pub fork_fallbacks: usize,
    /// Highest number of simultaneously live forked tasks.
    pub peak_live_tasks: usize,
    /// Distinct cells in the visited set at the end of the run.
    pub visited: usize,
    /// Termination signals raised: goal cells popped by any task, including
    /// tasks that lost the race to report.
    pub goal_signals: usize,
}

/// Cache-padded atomic counters behind [`SearchStats`].
#[derive(Default)]
pub(crate) struct StatCounters {
    pub(crate) expansions: CachePadded<AtomicUsize>,
    pub(crate) duplicate_expansions: AtomicUsize,
    pub(crate) skipped: CachePadded<AtomicUsize>,
    pub(crate) forks: AtomicUsize,
    pub(crate) tasks_spawned: AtomicUsize,
    pub(crate) fork_fallbacks: AtomicUsize,
    pub(crate) goal_signals: AtomicUsize,
}

impl StatCounters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn add(counter: &AtomicUsize, n: usize) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, visited: usize, peak_live_tasks: usize) -> SearchStats {
        let get = |c: &AtomicUsize| c.load(Ordering::Relaxed);
        SearchStats {
            expansions: get(&*self.expansions),
            duplicate_expansions: get(&self.duplicate_expansions),
            skipped: get(&*self.skipped),
            forks: get(&self.forks),
            tasks_spawned: get(&self.tasks_spawned),
            fork_fallbacks: get(&self.fork_fallbacks),
            peak_live_tasks,
            visited,
            goal_signals: get(&self.goal_signals),
        }
    }
}
