//! A compact CSR (compressed sparse row) maze.
//!
//! Memory layout:
//! - `offsets`: `Vec<usize>` of length `n + 1` (row offsets)
//! - `edges`: contiguous neighbour targets for each row
//! - `goals`: one flag per cell
//! - `players`: the cosmetic [`PlayerBoard`]

use super::{Cell, Maze, PlayerBoard, PlayerId};

/// A maze over an arbitrary directed graph in CSR form.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Builds CSR from adjacency list |
/// | `neighbors` | \(O(1)\) | Returns a slice of outgoing neighbours |
/// | `degree` | \(O(1)\) | Returns out-degree |
/// | `has_edge` | \(O(\text{out-degree})\) | Linear scan of neighbours |
/// | `has_goal` | \(O(1)\) | Flag lookup |
#[derive(Debug)]
pub struct CsrMaze {
    offsets: Vec<usize>,
    edges: Vec<Cell>,
    goals: Vec<bool>,
    players: PlayerBoard,
}

impl CsrMaze {
    /// Builds a maze from an adjacency list and a list of goal cells.
    ///
    /// # Panics
    ///
    /// Panics if any edge or goal references a cell out of bounds.
    pub fn from_adjacency(adjacency: &[Vec<Cell>], goals: &[Cell]) -> Self {
        let n = adjacency.len();

        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0);

        let mut total_edges = 0usize;
        for nbrs in adjacency {
            total_edges = total_edges.saturating_add(nbrs.len());
            offsets.push(total_edges);
        }

        let mut edges = Vec::with_capacity(total_edges);
        for (u, nbrs) in adjacency.iter().enumerate() {
            for &v in nbrs {
                assert!(v < n, "edge {u}->{v} is out of bounds for n={n}");
                edges.push(v);
            }
        }

        let mut maze = Self {
            offsets,
            edges,
            goals: vec![false; n],
            players: PlayerBoard::new(),
        };
        for &g in goals {
            maze.set_goal(g, true);
        }
        maze
    }

    /// Builds a maze from undirected edges: every `(a, b)` is walkable both ways.
    ///
    /// # Panics
    ///
    /// Panics if any edge or goal references a cell `>= n`.
    pub fn from_undirected_edges(n: usize, edges: &[(Cell, Cell)], goals: &[Cell]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            assert!(a < n && b < n, "edge {a}-{b} is out of bounds for n={n}");
            adjacency[a].push(b);
            if a != b {
                adjacency[b].push(a);
            }
        }
        Self::from_adjacency(&adjacency, goals)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len().saturating_sub(1)
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the out-degree of a node.
    pub fn degree(&self, node: Cell) -> usize {
        self.neighbors(node).len()
    }

    /// Checks if an edge exists from `from` to `to`.
    pub fn has_edge(&self, from: Cell, to: Cell) -> bool {
        assert!(to < self.node_count(), "to vertex {to} out of bounds");
        self.neighbors(from).contains(&to)
    }

    /// Marks or unmarks `cell` as a goal.
    ///
    /// # Panics
    /// Panics if `cell` is out of bounds.
    pub fn set_goal(&mut self, cell: Cell, goal: bool) {
        let n = self.node_count();
        assert!(cell < n, "goal {cell} is out of bounds for n={n}");
        self.goals[cell] = goal;
    }

    /// All goal cells in ascending order.
    pub fn goals(&self) -> Vec<Cell> {
        self.goals
            .iter()
            .enumerate()
            .filter_map(|(c, &g)| g.then_some(c))
            .collect()
    }

    /// The player board fed by [`Maze::new_player`] and [`Maze::move_player`].
    ///
    /// It accumulates the players of every run on this maze; see
    /// [`CsrMaze::reset_players`].
    pub fn players(&self) -> &PlayerBoard {
        &self.players
    }

    /// Removes all players, e.g. between two runs on the same maze.
    pub fn reset_players(&mut self) {
        self.players.clear();
    }
}

impl Maze for CsrMaze {
    #[inline]
    fn cell_count(&self) -> usize {
        self.node_count()
    }

    #[inline]
    fn neighbors(&self, cell: Cell) -> &[Cell] {
        assert!(cell < self.node_count(), "node {cell} out of bounds");
        &self.edges[self.offsets[cell]..self.offsets[cell + 1]]
    }

    #[inline]
    fn has_goal(&self, cell: Cell) -> bool {
        self.goals[cell]
    }

    fn new_player(&self, cell: Cell) -> PlayerId {
        self.players.spawn(cell)
    }

    fn move_player(&self, player: PlayerId, cell: Cell) {
        self.players.step(player, cell);
    }
}

#[cfg(test)]
mod tests;
