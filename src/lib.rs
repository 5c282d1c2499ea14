//! # `amazed` - Fork/Join Maze Search
//!
//! A depth-first maze solver that splits itself into concurrent subsearches
//! whenever a cell offers enough unexplored branches.
//!
//! ## Architecture
//!
//! ### Core Abstractions
//!
//! 1. **Shared search state** (`SharedState`):
//!    - Lock-free visited set (word-packed atomic bitset), monotone for a run
//!    - Set-once termination flag polled by every task
//!    - Live-task accounting for an optional fork cap
//!
//! 2. **Predecessor map** (`PredecessorMap`):
//!    - One atomic slot per cell, first-writer-wins
//!    - Consumed once, by the task that reaches a goal first
//!
//! 3. **Search tasks**:
//!    - Iterative DFS over a private frontier
//!    - Fork one child per unvisited neighbour at eligible branch points, joined
//!      through rayon's `find_map_any`
//!
//! 4. **Mazes** (`Maze`, `CsrMaze`, `GridMaze`):
//!    - Adjacency, goal testing and cosmetic player tokens
//!
//! ### Visit policy
//!
//! By default a task expands a cell only if its atomic test-and-set inserted
//! it. `VisitPolicy::CheckThenInsert` separates the check from the insert, so
//! two tasks may expand the same cell; the final path is still unique, because
//! only the first task to raise the termination flag reports one.
//!
//! ## Example
//!
//! ```rust
//! use amazed::{CsrMaze, ForkJoinSolver, SolverConfig};
//!
//! // A star: centre 0, leaves 1..=3, goal at 3.
//! let maze = CsrMaze::from_undirected_edges(4, &[(0, 1), (0, 2), (0, 3)], &[3]);
//! let solver = ForkJoinSolver::new(&maze, SolverConfig::default().with_fork_after(0));
//! let solution = solver.solve(0).unwrap();
//! assert_eq!(solution.path, Some(vec![0, 3]));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod search;

pub use config::{SolverConfig, VisitPolicy};
pub use error::{ConfigError, MazeParseError, ReconstructionError, SolveError};
pub use graph::{Cell, CsrMaze, GridMaze, Maze, PlayerBoard, PlayerId};
pub use search::{
    reconstruct, solve, ForkJoinSolver, NoopObserver, PredecessorMap, SearchObserver, SearchStats,
    SequentialSolver, SharedState, Solution, TracingObserver,
};

// Compile-time checks that the run state can be shared across workers.
const _: () = {
    const fn assert_sync<T: Sync>() {}
    assert_sync::<SharedState>();
    assert_sync::<PredecessorMap>();
    assert_sync::<CsrMaze>();
    assert_sync::<GridMaze>();
};
