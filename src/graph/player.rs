//! Player tokens: which cell each search task is currently standing on.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    PoisonError, RwLock,
};

/// Handle to a player on a [`PlayerBoard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Handle returned by mazes that do not track players.
    pub const DETACHED: PlayerId = PlayerId(usize::MAX);
}

/// Concurrent occupancy board.
///
/// Spawning takes the table's write lock; moving only takes the read lock and
/// stores into the player's atomic slot. The board never influences a search.
///
/// Every task of every run spawns a player and nothing is removed until
/// [`PlayerBoard::clear`]. A maze that is solved repeatedly keeps growing its
/// board unless the owner clears it between runs.
#[derive(Debug, Default)]
pub struct PlayerBoard {
    positions: RwLock<Vec<AtomicUsize>>,
    moves: AtomicUsize,
}

impl PlayerBoard {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new player on `cell`.
    pub fn spawn(&self, cell: usize) -> PlayerId {
        let mut positions = self.positions.write().unwrap_or_else(PoisonError::into_inner);
        positions.push(AtomicUsize::new(cell));
        PlayerId(positions.len() - 1)
    }

    /// Moves `player` to `cell`. Unknown or detached handles are ignored.
    pub fn step(&self, player: PlayerId, cell: usize) {
        let positions = self.positions.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = positions.get(player.0) {
            slot.store(cell, Ordering::Relaxed);
            self.moves.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Last known cell of `player`.
    pub fn position(&self, player: PlayerId) -> Option<usize> {
        let positions = self.positions.read().unwrap_or_else(PoisonError::into_inner);
        positions.get(player.0).map(|slot| slot.load(Ordering::Relaxed))
    }

    /// Number of players spawned so far.
    pub fn player_count(&self) -> usize {
        self.positions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of successful moves so far.
    pub fn total_moves(&self) -> usize {
        self.moves.load(Ordering::Relaxed)
    }

    /// Removes every player.
    pub fn clear(&mut self) {
        self.positions.get_mut().unwrap_or_else(PoisonError::into_inner).clear();
        *self.moves.get_mut() = 0;
    }
}
