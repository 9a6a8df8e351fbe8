//! Rayon-based batch execution for per-row pricing.
//!
//! Rows are priced in fixed-size chunks. Above the parallel threshold the
//! chunks are spread across the Rayon pool; below it they run on the
//! calling thread. Output order always matches input order, so both paths
//! produce identical results.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Batch size for chunked processing.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Minimum row count before the Rayon pool is used.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Batch size for chunked processing
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never uses the Rayon pool.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..Self::default()
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Progress of a chunked batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Items finished so far, including the chunk just completed
    pub processed: usize,
    /// Total items in the run
    pub total: usize,
}

impl BatchProgress {
    /// Completed fraction in `[0, 1]`; an empty run counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}

/// Maps every item through `mapper` in chunks of `config.batch_size`,
/// reporting progress after each chunk.
///
/// With parallelism enabled, chunks complete in any order, so successive
/// `processed` values may arrive from different worker threads; the final
/// report always equals `total`. The returned vector preserves input order.
pub fn map_in_batches<T, R, F, P>(
    items: &[T],
    config: &ParallelConfig,
    mapper: F,
    on_progress: P,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
    P: Fn(BatchProgress) + Sync + Send,
{
    let total = items.len();
    let batch_size = config.batch_size.max(1);
    let processed = AtomicUsize::new(0);

    let run_chunk = |chunk: &[T]| -> Vec<R> {
        let results: Vec<R> = chunk.iter().map(&mapper).collect();
        let done = processed.fetch_add(chunk.len(), Ordering::Relaxed) + chunk.len();
        on_progress(BatchProgress {
            processed: done,
            total,
        });
        results
    };

    let chunks: Vec<Vec<R>> = if config.should_parallelize(total) {
        items.par_chunks(batch_size).map(run_chunk).collect()
    } else {
        items.chunks(batch_size).map(run_chunk).collect()
    };

    chunks.into_iter().flatten().collect()
}
