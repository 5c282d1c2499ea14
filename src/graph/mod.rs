//! The maze collaborator: cell adjacency, goal testing and cosmetic player tokens.
//!
//! Maze implementations are organized by representation:
//! - `csr_maze`: compressed sparse row adjacency for arbitrary graphs
//! - `grid_maze`: rectangular ASCII mazes, stored as a CSR maze underneath
//! - `player`: occupancy tracking used for rendering movement

pub mod csr_maze;
pub mod grid_maze;
pub mod player;

pub use csr_maze::CsrMaze;
pub use grid_maze::GridMaze;
pub use player::{PlayerBoard, PlayerId};

/// Identifier of a maze cell. Cells of a maze are `0..cell_count()`.
pub type Cell = usize;

/// A graph-shaped maze, as consumed by the solvers.
///
/// Implementations are read concurrently by every worker of a run, hence `Sync`.
/// The player methods are purely cosmetic and have no effect on search results.
pub trait Maze: Sync {
    /// Number of cells.
    fn cell_count(&self) -> usize;

    /// Cells directly reachable from `cell`.
    fn neighbors(&self, cell: Cell) -> &[Cell];

    /// Whether `cell` is a goal.
    fn has_goal(&self, cell: Cell) -> bool;

    /// Places a new player token on `cell`.
    fn new_player(&self, _cell: Cell) -> PlayerId {
        PlayerId::DETACHED
    }

    /// Moves `player` onto `cell`.
    fn move_player(&self, _player: PlayerId, _cell: Cell) {}
}
