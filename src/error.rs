//! Error types for amazed.
//!
//! An unreachable goal is not an error: solvers report it as `Ok(None)`.
//! Everything here is either a caller mistake (bad config, bad start cell,
//! malformed maze text) or an internal invariant violation that must surface.

use thiserror::Error;

use crate::graph::Cell;

/// Top-level error for a solver run.
#[derive(Error, Debug)]
pub enum SolveError {
    /// The predecessor chain of the winning goal is broken.
    #[error("path reconstruction failed: {0}")]
    Reconstruction(#[from] ReconstructionError),

    /// The configuration was rejected before the run started.
    #[error("invalid solver configuration: {0}")]
    Config(#[from] ConfigError),

    /// The start cell does not exist in the maze.
    #[error("start cell {start} is out of bounds for a maze of {cells} cells")]
    StartOutOfBounds {
        /// The requested start cell.
        start: Cell,
        /// Number of cells in the maze.
        cells: usize,
    },

    /// The rayon pool for the run could not be created.
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Internal invariant violation while walking predecessor links.
///
/// Seeing one of these means a cell was expanded or forked without a recorded
/// predecessor. It is a defect, never a normal outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructionError {
    /// A cell on the chain has no recorded predecessor.
    #[error("cell {cell} has no recorded predecessor")]
    MissingPredecessor {
        /// The cell whose predecessor is missing.
        cell: Cell,
    },

    /// The chain did not reach the start within `steps` hops.
    #[error("predecessor chain from goal {goal} did not reach the start after {steps} steps")]
    Cycle {
        /// The goal the walk started from.
        goal: Cell,
        /// Hops taken before giving up.
        steps: usize,
    },
}

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `min_branches` must be at least 2 for a fork to split anything.
    #[error("min_branches must be >= 2, got {0}")]
    InvalidMinBranches(usize),

    /// An explicit thread count of zero.
    #[error("threads must be > 0 when set")]
    ZeroThreads,

    /// An explicit live-task cap of zero.
    #[error("max_live_tasks must be > 0 when set")]
    ZeroTaskCap,

    /// The JSON document could not be decoded.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from parsing an ASCII grid maze.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MazeParseError {
    /// No rows in the input.
    #[error("maze text is empty")]
    Empty,

    /// A row differs in width from the first row.
    #[error("row {row} has width {found}, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A character outside the maze alphabet.
    #[error("unknown character {ch:?} at row {row}, column {col}")]
    UnknownChar {
        /// The offending character.
        ch: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },

    /// No start marker.
    #[error("maze has no start cell")]
    MissingStart,

    /// More than one start marker.
    #[error("maze has more than one start cell (second at row {row}, column {col})")]
    MultipleStarts {
        /// Row of the second start marker.
        row: usize,
        /// Column of the second start marker.
        col: usize,
    },
}
