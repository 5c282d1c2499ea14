//! Solver configuration.
//!
//! Every field has a default, so a partial JSON document (or `{}`) is a valid
//! configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default for [`SolverConfig::max_fork_depth`].
pub const DEFAULT_MAX_FORK_DEPTH: usize = 64;

/// How a task performs the "is visited?" / "mark visited" pair before expanding a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitPolicy {
    /// One atomic test-and-set. A cell is expanded only by the task that inserted it.
    #[default]
    Atomic,
    /// A separate check followed by an insert. Two tasks may both see a cell as
    /// unvisited and both expand it; the duplicates are counted in the run stats.
    CheckThenInsert,
}

/// Tuning for [`ForkJoinSolver`](crate::ForkJoinSolver).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Sequential expansions a task performs after creation (or after its last
    /// fork) before it may fork again. `usize::MAX` never forks.
    pub fork_after: usize,
    /// Minimum number of unvisited neighbours at a cell for it to be a fork point.
    pub min_branches: usize,
    /// Worker threads in the run's pool. `None` lets rayon pick.
    pub threads: Option<usize>,
    /// Upper bound on concurrently live forked tasks. `None` is unbounded.
    pub max_live_tasks: Option<usize>,
    /// Deepest nesting of fork/join blocks. Each level holds a join on the
    /// worker stack; a task at this depth expands sequentially instead. `0`
    /// never forks.
    pub max_fork_depth: usize,
    /// Visited-set discipline.
    pub visit_policy: VisitPolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            fork_after: 4,
            min_branches: 3,
            threads: None,
            max_live_tasks: None,
            max_fork_depth: DEFAULT_MAX_FORK_DEPTH,
            visit_policy: VisitPolicy::Atomic,
        }
    }
}

impl SolverConfig {
    /// A configuration that never forks: the run is a plain sequential DFS on one task.
    pub fn sequential() -> Self {
        Self {
            fork_after: usize::MAX,
            ..Self::default()
        }
    }

    /// Sets [`fork_after`](Self::fork_after).
    #[must_use]
    pub fn with_fork_after(mut self, fork_after: usize) -> Self {
        self.fork_after = fork_after;
        self
    }

    /// Sets [`min_branches`](Self::min_branches).
    #[must_use]
    pub fn with_min_branches(mut self, min_branches: usize) -> Self {
        self.min_branches = min_branches;
        self
    }

    /// Sets [`threads`](Self::threads).
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Sets [`max_live_tasks`](Self::max_live_tasks).
    #[must_use]
    pub fn with_max_live_tasks(mut self, cap: usize) -> Self {
        self.max_live_tasks = Some(cap);
        self
    }

    /// Sets [`max_fork_depth`](Self::max_fork_depth).
    #[must_use]
    pub fn with_max_fork_depth(mut self, depth: usize) -> Self {
        self.max_fork_depth = depth;
        self
    }

    /// Sets [`visit_policy`](Self::visit_policy).
    #[must_use]
    pub fn with_visit_policy(mut self, policy: VisitPolicy) -> Self {
        self.visit_policy = policy;
        self
    }

    /// Decodes a configuration from JSON and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_branches < 2 {
            return Err(ConfigError::InvalidMinBranches(self.min_branches));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        if self.max_live_tasks == Some(0) {
            return Err(ConfigError::ZeroTaskCap);
        }
        Ok(())
    }
}
