//! The predecessor map: for each discovered cell, the cell it was first reached from.
//!
//! A single map is shared by every task of a run, so it is a superset of each
//! root-to-task lineage's map. Entries are first-writer-wins. A cell's own entry
//! is always written before the cell is pushed or forked, so following entries
//! backwards always walks real edges towards the start and never loops.

use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::HashMap;

use crate::graph::Cell;

const ABSENT: usize = usize::MAX;

/// Read access to a predecessor relation, as consumed by path reconstruction.
pub trait Predecessors {
    /// The recorded predecessor of `cell`, if any.
    fn predecessor(&self, cell: Cell) -> Option<Cell>;

    /// Upper bound on the length of any valid chain (the number of cells).
    fn chain_bound(&self) -> usize;
}

/// Lock-free predecessor map with one atomic slot per cell.
pub struct PredecessorMap {
    slots: Vec<AtomicUsize>,
}

impl PredecessorMap {
    /// Creates an empty map for a maze of `cells` cells.
    pub fn new(cells: usize) -> Self {
        let slots = (0..cells).map(|_| AtomicUsize::new(ABSENT)).collect();
        Self { slots }
    }

    /// Records `pred` as the predecessor of `cell` unless one is already recorded.
    ///
    /// Returns `true` iff this call wrote the entry.
    ///
    /// # Panics
    /// Panics if `cell` is out of bounds.
    #[inline]
    pub fn record(&self, cell: Cell, pred: Cell) -> bool {
        debug_assert!(pred != ABSENT);
        self.slots[cell]
            .compare_exchange(ABSENT, pred, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// The recorded predecessor of `cell`. Out-of-bounds cells have none.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<Cell> {
        let slot = self.slots.get(cell)?;
        match slot.load(Ordering::Acquire) {
            ABSENT => None,
            pred => Some(pred),
        }
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.load(Ordering::Acquire) != ABSENT)
            .count()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Predecessors for PredecessorMap {
    fn predecessor(&self, cell: Cell) -> Option<Cell> {
        self.get(cell)
    }

    fn chain_bound(&self) -> usize {
        self.slots.len()
    }
}

impl Predecessors for HashMap<Cell, Cell> {
    fn predecessor(&self, cell: Cell) -> Option<Cell> {
        self.get(&cell).copied()
    }

    fn chain_bound(&self) -> usize {
        // Every cell on a chain except the start has an entry.
        self.len() + 1
    }
}
