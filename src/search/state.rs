//! Shared search state: the visited set, the termination flag and live-task accounting.
//!
//! One [`SharedState`] exists per run and is handed to every task by shared
//! reference. Nothing in it is ever un-set during a run: visited membership only
//! grows and the termination flag only goes from clear to set.

use core::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_utils::CachePadded;

use super::stats::{SearchStats, StatCounters};
use crate::{
    concurrency::{AtomicBitset, TerminationFlag},
    config::VisitPolicy,
    graph::Cell,
};

/// Cells claimed by any task of the run.
pub struct VisitedSet {
    bits: AtomicBitset,
}

impl VisitedSet {
    /// Creates an empty set for a maze of `cells` cells.
    pub fn new(cells: usize) -> Self {
        Self {
            bits: AtomicBitset::new(cells),
        }
    }

    /// Inserts `cell`, returning `true` iff this caller performed the insertion.
    #[inline]
    pub fn claim(&self, cell: Cell) -> bool {
        self.bits.test_and_set(cell, Ordering::AcqRel)
    }

    /// Inserts `cell` without a prior membership check.
    ///
    /// Returns `false` when the cell was already present, which under
    /// [`VisitPolicy::CheckThenInsert`] means another task raced past the same check.
    #[inline]
    pub fn mark(&self, cell: Cell) -> bool {
        self.bits.test_and_set(cell, Ordering::Release)
    }

    /// Membership test.
    #[inline]
    pub fn is_visited(&self, cell: Cell) -> bool {
        self.bits.is_set(cell, Ordering::Acquire)
    }

    /// Number of visited cells. Monotone across calls within a run.
    pub fn len(&self) -> usize {
        self.bits.count_ones(Ordering::Acquire)
    }

    /// Whether no cell has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Counts forked tasks that are currently live, optionally against a cap.
pub(crate) struct TaskBudget {
    live: CachePadded<AtomicUsize>,
    peak: AtomicUsize,
    cap: Option<usize>,
}

impl TaskBudget {
    pub(crate) fn new(cap: Option<usize>) -> Self {
        Self {
            live: CachePadded::new(AtomicUsize::new(0)),
            peak: AtomicUsize::new(0),
            cap,
        }
    }

    /// Reserves `n` slots at once, or none if that would exceed the cap.
    pub(crate) fn try_reserve(&self, n: usize) -> Option<ForkPermit<'_>> {
        let prev = self
            .live
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |live| {
                let next = live.checked_add(n)?;
                match self.cap {
                    Some(cap) if next > cap => None,
                    _ => Some(next),
                }
            })
            .ok()?;
        self.peak.fetch_max(prev + n, Ordering::Relaxed);
        Some(ForkPermit { budget: self, slots: n })
    }

    pub(crate) fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

/// Live-task slots reserved for a fork/join block; released on drop.
pub(crate) struct ForkPermit<'a> {
    budget: &'a TaskBudget,
    slots: usize,
}

impl<'a> ForkPermit<'a> {
    /// Splits the reservation into one single-slot permit per child, so each
    /// child frees its slot as soon as it finishes or is discarded.
    pub(crate) fn split(mut self) -> Vec<ForkPermit<'a>> {
        let slots = core::mem::take(&mut self.slots);
        (0..slots)
            .map(|_| ForkPermit {
                budget: self.budget,
                slots: 1,
            })
            .collect()
    }
}

impl Drop for ForkPermit<'_> {
    fn drop(&mut self) {
        if self.slots > 0 {
            self.budget.live.fetch_sub(self.slots, Ordering::AcqRel);
        }
    }
}

/// Outcome of [`SharedState::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visit {
    /// The caller inserted the cell and expands it.
    Claimed,
    /// Another task marked the cell between the caller's check and insert; the
    /// caller expands it anyway.
    Duplicate,
    /// Already visited; the caller moves on.
    Skipped,
}

impl Visit {
    pub(crate) fn expands(self) -> bool {
        !matches!(self, Visit::Skipped)
    }
}

/// State shared by every task of one run.
pub struct SharedState {
    visited: VisitedSet,
    done: TerminationFlag,
    policy: VisitPolicy,
    tasks: TaskBudget,
    pub(crate) counters: StatCounters,
}

impl SharedState {
    /// Creates fresh state for a maze of `cells` cells.
    pub fn new(cells: usize, policy: VisitPolicy, max_live_tasks: Option<usize>) -> Self {
        Self {
            visited: VisitedSet::new(cells),
            done: TerminationFlag::new(),
            policy,
            tasks: TaskBudget::new(max_live_tasks),
            counters: StatCounters::default(),
        }
    }

    /// The visited set.
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Sets the termination flag; `true` only for the first caller.
    pub fn terminate(&self) -> bool {
        self.done.signal()
    }

    /// Whether some task has already reached a goal.
    pub fn is_terminated(&self) -> bool {
        self.done.is_set()
    }

    /// Number of forked tasks alive right now.
    pub fn live_tasks(&self) -> usize {
        self.tasks.live()
    }

    pub(crate) fn tasks(&self) -> &TaskBudget {
        &self.tasks
    }

    /// Decides whether the caller may expand `cell`, applying the visit policy.
    pub(crate) fn enter(&self, cell: Cell) -> Visit {
        let visit = match self.policy {
            VisitPolicy::Atomic if self.visited.claim(cell) => Visit::Claimed,
            VisitPolicy::Atomic => Visit::Skipped,
            VisitPolicy::CheckThenInsert if self.visited.is_visited(cell) => Visit::Skipped,
            VisitPolicy::CheckThenInsert if self.visited.mark(cell) => Visit::Claimed,
            VisitPolicy::CheckThenInsert => Visit::Duplicate,
        };
        match visit {
            Visit::Claimed => StatCounters::bump(&self.counters.expansions),
            Visit::Duplicate => {
                StatCounters::bump(&self.counters.expansions);
                StatCounters::bump(&self.counters.duplicate_expansions);
            }
            Visit::Skipped => StatCounters::bump(&self.counters.skipped),
        }
        visit
    }

    /// Snapshot of the run's counters.
    pub fn stats(&self) -> SearchStats {
        self.counters
            .snapshot(self.visited.len(), self.tasks.peak())
    }
}
