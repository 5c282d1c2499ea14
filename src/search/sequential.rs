//! Single-threaded depth-first search: the baseline every fork/join run is
//! measured against.

use std::collections::{HashMap, HashSet};

use super::path::reconstruct;
use crate::{
    error::ReconstructionError,
    graph::{Cell, Maze},
};

/// Plain DFS with a private stack and a `HashMap` predecessor map.
pub struct SequentialSolver<'m, M: Maze + ?Sized> {
    maze: &'m M,
}

impl<'m, M: Maze + ?Sized> SequentialSolver<'m, M> {
    /// Creates a solver over `maze`.
    pub fn new(maze: &'m M) -> Self {
        Self { maze }
    }

    /// Searches from `start` and returns a path to the first goal popped, or `None`.
    ///
    /// **Time complexity**: \(O(n + m)\)
    /// **Space complexity**: \(O(n)\) for stack, visited set and predecessors
    pub fn solve(&self, start: Cell) -> Result<Option<Vec<Cell>>, ReconstructionError> {
        let mut frontier = vec![start];
        let mut visited = HashSet::new();
        let mut predecessors: HashMap<Cell, Cell> = HashMap::new();
        let player = self.maze.new_player(start);

        while let Some(cell) = frontier.pop() {
            if self.maze.has_goal(cell) {
                self.maze.move_player(player, cell);
                return reconstruct(start, cell, &predecessors).map(Some);
            }
            if !visited.insert(cell) {
                continue;
            }
            self.maze.move_player(player, cell);
            for &next in self.maze.neighbors(cell) {
                if !visited.contains(&next) {
                    predecessors.insert(next, cell);
                    frontier.push(next);
                }
            }
        }

        Ok(None)
    }
}
