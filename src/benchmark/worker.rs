//! Load worker thread implementation
//!
//! Each worker owns its message buffer exclusively. The only shared state
//! it touches is the operation counter (write-only) and the stop signal
//! (read-only, polled once per batch).

use std::sync::Arc;
use std::time::Instant;

use hdrhistogram::Histogram;
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, error, info};

use super::counters::LoadCounters;
use super::stop::{StopReason, StopSignal};
use crate::config::LoadConfig;
use crate::utils::ComputeError;
use crate::workload::Compute;

/// Upper bound for per-operation latency samples (60 s in nanoseconds)
const MAX_LATENCY_NS: u64 = 60_000_000_000;

/// Create an empty per-operation latency histogram (nanoseconds)
pub fn new_latency_histogram() -> Histogram<u64> {
    Histogram::new_with_bounds(1, MAX_LATENCY_NS, 3).expect("Failed to create histogram")
}

/// Result from a worker thread
pub struct WorkerResult {
    /// Worker ID
    pub worker_id: usize,
    /// Operations this worker added to the shared counter
    pub operations: u64,
    /// Mean operation latency of each batch (nanoseconds)
    pub histogram: Histogram<u64>,
    /// Error that ended the worker early
    pub error: Option<String>,
}

impl WorkerResult {
    fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            operations: 0,
            histogram: new_latency_histogram(),
            error: None,
        }
    }
}

/// A single load worker
pub struct Worker {
    id: usize,
    buffer_size: usize,
    batch_size: u64,
    operation: Arc<dyn Compute>,
    counters: Arc<LoadCounters>,
    stop: Arc<StopSignal>,
}

impl Worker {
    pub fn new(
        id: usize,
        config: &LoadConfig,
        operation: Arc<dyn Compute>,
        counters: Arc<LoadCounters>,
        stop: Arc<StopSignal>,
    ) -> Self {
        Self {
            id,
            buffer_size: config.buffer_size,
            batch_size: config.batch_size,
            operation,
            counters,
            stop,
        }
    }

    /// Run until the stop signal is raised or an error occurs
    pub fn run(self) -> WorkerResult {
        let mut result = WorkerResult::new(self.id);

        if let Err(e) = self.run_loop(&mut result) {
            error!("Worker {} failed: {}", self.id, e);
            self.counters.record_failure();
            result.error = Some(e.to_string());
        }

        if self.counters.worker_exited() && self.stop.stop(StopReason::WorkersExited) {
            info!("All workers exited before the run was stopped");
        }

        debug!("Worker {} done after {} operations", self.id, result.operations);
        result
    }

    fn run_loop(&self, result: &mut WorkerResult) -> Result<(), ComputeError> {
        let mut msg = vec![0u8; self.buffer_size];
        OsRng.try_fill_bytes(&mut msg)?;

        loop {
            let batch_start = Instant::now();
            for _ in 0..self.batch_size {
                self.operation.compute(&msg)?;
            }
            let batch_ns = batch_start.elapsed().as_nanos() as u64;
            result
                .histogram
                .saturating_record((batch_ns / self.batch_size).max(1));

            self.counters.record_batch(self.batch_size);
            result.operations += self.batch_size;

            if self.stop.is_stopped() {
                return Ok(());
            }
        }
    }
}
