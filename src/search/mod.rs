//! Fork/join depth-first search.
//!
//! - `state`: the run-wide visited set, termination flag and task budget
//! - `predecessors`: first-writer-wins predecessor map
//! - `path`: reconstruction of the winning path
//! - `task`: the recursive search task
//! - `solver`: the fork/join driver and the `solve` entry point
//! - `sequential`: the single-threaded baseline
//! - `observer` / `stats`: observability

pub mod observer;
pub mod path;
pub mod predecessors;
pub mod sequential;
pub mod solver;
pub mod state;
pub mod stats;
pub(crate) mod task;

pub use observer::{NoopObserver, SearchObserver, TracingObserver};
pub use path::reconstruct;
pub use predecessors::{PredecessorMap, Predecessors};
pub use sequential::SequentialSolver;
pub use solver::{solve, ForkJoinSolver, Solution};
pub use state::{SharedState, VisitedSet};
pub use stats::SearchStats;
