//! Sizing of the thread pool that scores pairings.
//!
//! A configured worker count of 0 means "whatever the global rayon pool has";
//! any other count gets a dedicated pool for the duration of one
//! [WorkerPool::install] call.

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Threads per evaluation; 0 runs on the global rayon pool.
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Threads a workload installed on this pool will actually get.
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            rayon::current_num_threads()
        } else {
            self.workers
        }
    }

    /// Run `f` with this pool's parallelism. Rayon calls inside `f` (such as
    /// `par_iter`) are spread over the configured threads.
    pub fn install<F, R>(&self, f: F) -> Result<R, ThreadPoolBuildError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            Ok(f())
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .thread_name(|index| format!("fleetlab-worker-{index}"))
                .build()?;
            Ok(pool.install(f))
        }
    }
}
