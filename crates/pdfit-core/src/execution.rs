//! Sequential or rayon-parallel execution of independent work items
//!
//! Per-family estimation, per-candidate scoring and per-resample bootstrap
//! work are all side-effect free, so they can run on the rayon pool. Results
//! are always returned in index order, whichever strategy is used.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// Process items sequentially on the calling thread
    Sequential,
    /// Process items on the global rayon pool
    #[default]
    Parallel,
}

impl ExecutionStrategy {
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Parallel)
    }

    /// Run `f(i)` for `i in 0..count`, collecting in index order
    pub fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential => (0..count).map(f).collect(),
            Self::Parallel => (0..count).into_par_iter().map(f).collect(),
        }
    }

    /// Map `f` over `items`, collecting in input order
    pub fn map<T, F, R>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        F: Fn(&T) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential => items.iter().map(f).collect(),
            Self::Parallel => items.par_iter().map(f).collect(),
        }
    }

    /// Number of worker threads the strategy uses
    pub fn num_threads(&self) -> usize {
        match self {
            Self::Sequential => 1,
            Self::Parallel => rayon::current_num_threads(),
        }
    }
}
