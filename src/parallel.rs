//! Thread configuration for Legendre evaluation
//!
//! The Legendre engine evaluates each point independently and spreads the
//! points over a Rayon pool. [`ParallelConfig`] runs an evaluation inside a
//! scoped pool of the requested size, or on the global pool when no size is
//! given.

use crate::errors::{GeoidError, Result};
use log::{debug, info};
use rayon::ThreadPoolBuilder;

/// Number of worker threads for polynomial evaluation
///
/// `None` leaves Rayon's default (one thread per logical core).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    pub fn new(num_threads: Option<usize>) -> Self {
        Self { num_threads }
    }

    /// One worker per logical core
    pub fn all_cores() -> Self {
        Self::with_threads(num_cpus::get())
    }

    pub fn with_threads(num_threads: usize) -> Self {
        Self {
            num_threads: Some(num_threads),
        }
    }

    /// Run `op` with this configuration
    ///
    /// With an explicit thread count `op` runs inside a dedicated pool, so
    /// every parallel iterator it starts uses exactly that many workers.
    /// Without one it runs on the current (usually global) pool.
    pub fn install<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match self.num_threads {
            Some(num_threads) => {
                let pool = ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| pool_error(num_threads, e))?;
                debug!("Running in a scoped pool of {} threads", num_threads);
                Ok(pool.install(op))
            }
            None => Ok(op()),
        }
    }
}

fn pool_error(num_threads: usize, error: rayon::ThreadPoolBuildError) -> GeoidError {
    GeoidError::ThreadPoolError(format!(
        "Failed to initialize thread pool with {} threads: {}",
        num_threads, error
    ))
}

/// Snapshot of the threading environment
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

/// Threads in the current pool and cores the machine offers
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Log the threading environment at info level
    pub fn log(&self) {
        info!(
            "Rayon threads: {}, logical cores: {}, available parallelism: {}",
            self.current_threads, self.available_cores, self.available_parallelism
        );
    }
}
