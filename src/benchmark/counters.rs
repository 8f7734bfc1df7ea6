//! Shared atomic counters
//!
//! These are the only values workers write to concurrently. Workers never
//! read them back; the coordinator and progress reporter do.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared between all worker threads
pub struct LoadCounters {
    /// Total operations completed, advanced one batch at a time
    operations: AtomicU64,

    /// Workers that exited because of an error
    failed_workers: AtomicU64,

    /// Workers still running their loop
    live_workers: AtomicUsize,
}

impl LoadCounters {
    /// Create counters for `workers` live workers, all totals at zero
    pub fn new(workers: usize) -> Self {
        Self {
            operations: AtomicU64::new(0),
            failed_workers: AtomicU64::new(0),
            live_workers: AtomicUsize::new(workers),
        }
    }

    /// Record a completed batch
    #[inline]
    pub fn record_batch(&self, batch_size: u64) {
        self.operations.fetch_add(batch_size, Ordering::Relaxed);
    }

    /// Total operations completed so far
    #[inline]
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// Record a worker that stopped on an error
    pub fn record_failure(&self) {
        self.failed_workers.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of workers that stopped on an error
    pub fn failures(&self) -> u64 {
        self.failed_workers.load(Ordering::Relaxed)
    }

    /// Mark one worker as exited
    ///
    /// Returns true for the last worker out.
    pub fn worker_exited(&self) -> bool {
        self.live_workers.fetch_sub(1, Ordering::AcqRel) == 1
    }

    /// Workers still inside their loop
    pub fn live_workers(&self) -> usize {
        self.live_workers.load(Ordering::Acquire)
    }
}
