//! Load orchestrator
//!
//! Coordinates worker threads and manages the run lifecycle:
//! `Starting -> Running -> Stopping -> Done`.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use super::counters::LoadCounters;
use super::signals::InterruptListener;
use super::stop::{StopReason, StopSignal};
use super::worker::{new_latency_histogram, Worker, WorkerResult};
use crate::config::LoadConfig;
use crate::metrics::{format_count, format_throughput};
use crate::utils::Result;
use crate::workload::{Algorithm, Compute, Operation};

/// Process-level run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Configuration resolved, algorithm being bound
    Starting,
    /// Workers active, stop signal unset
    Running,
    /// Stop signal set, workers draining
    Stopping,
    /// All workers joined
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Stopping => "stopping",
            Self::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Error that ended one worker
#[derive(Debug, Clone)]
pub struct WorkerFailure {
    pub worker_id: usize,
    pub error: String,
}

/// Summary of a finished run
pub struct BenchmarkResult {
    pub algorithm: Algorithm,
    pub threads: usize,
    /// Thread count asked for, when it was clamped down
    pub requested_threads: Option<usize>,
    pub buffer_size: usize,
    pub batch_size: u64,
    /// What ended the run
    pub stop_reason: StopReason,
    /// Wall time from spawning the first worker to joining the last
    pub duration: Duration,
    /// Total operations completed
    pub total_ops: u64,
    /// Throughput (operations per second)
    pub throughput: f64,
    /// Workers that exited on an error
    pub failed_workers: u64,
    /// Per-worker errors, in worker order
    pub worker_errors: Vec<WorkerFailure>,
    /// Merged mean per-operation latency of each batch (nanoseconds)
    pub histogram: Histogram<u64>,
}

impl BenchmarkResult {
    /// Get percentile latency per operation in microseconds
    pub fn percentile_us(&self, p: f64) -> f64 {
        self.histogram.value_at_percentile(p) as f64 / 1000.0
    }

    /// Print summary
    pub fn print_summary(&self) {
        println!("\n=== {} ===", self.algorithm.as_str().to_uppercase());
        println!(
            "Throughput: {} ops/s | Operations: {} | Duration: {:.2}s | Stopped by: {}{}",
            format_throughput(self.throughput),
            format_count(self.total_ops),
            self.duration.as_secs_f64(),
            self.stop_reason,
            if self.failed_workers > 0 {
                format!(" | Failed workers: {}", self.failed_workers)
            } else {
                String::new()
            }
        );
        println!(
            "Threads: {}{} | Buffer: {} bytes | Batch: {}",
            self.threads,
            match self.requested_threads {
                Some(requested) => format!(" (requested {})", requested),
                None => String::new(),
            },
            self.buffer_size,
            self.batch_size
        );
        for failure in &self.worker_errors {
            println!("Worker {} failed: {}", failure.worker_id, failure.error);
        }
        if !self.histogram.is_empty() {
            println!(
                "Mean latency per op, by batch (us): avg={:.2} p50={:.2} p99={:.2} max={:.2}",
                self.histogram.mean() / 1000.0,
                self.percentile_us(50.0),
                self.percentile_us(99.0),
                self.histogram.max() as f64 / 1000.0
            );
        }
    }
}

/// Load orchestrator
pub struct Orchestrator {
    config: Arc<LoadConfig>,
    operation: Arc<dyn Compute>,
    phase: RunPhase,
}

impl Orchestrator {
    /// Create new orchestrator, binding the algorithm and generating keys
    pub fn new(config: LoadConfig) -> Result<Self> {
        info!("Using {}", config.algorithm.description());
        let operation = Operation::bind(config.algorithm)?;
        if config.algorithm.is_signature() {
            debug!("Generated ephemeral {} keypair", config.algorithm);
        }

        Ok(Self::with_compute(config, Arc::new(operation)))
    }

    /// Create orchestrator around an already bound workload
    pub fn with_compute(config: LoadConfig, operation: Arc<dyn Compute>) -> Self {
        Self {
            config: Arc::new(config),
            operation,
            phase: RunPhase::Starting,
        }
    }

    /// Current run phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn enter(&mut self, phase: RunPhase) {
        debug!("Phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Run with SIGINT/SIGTERM handlers installed
    pub fn run(&mut self) -> Result<BenchmarkResult> {
        let stop = Arc::new(StopSignal::new());
        let _listener = InterruptListener::install(Arc::clone(&stop))?;
        Ok(self.run_with_stop(stop))
    }

    /// Run against a caller-owned stop signal, without OS handlers
    pub fn run_with_stop(&mut self, stop: Arc<StopSignal>) -> BenchmarkResult {
        let threads = self.config.threads;
        let counters = Arc::new(LoadCounters::new(threads));

        info!(
            "Execution duration is {}",
            humantime::format_duration(self.config.duration)
        );
        info!("Runs {} threads", threads);

        let start_time = Instant::now();
        // None only for durations past what the clock can represent
        let deadline = start_time.checked_add(self.config.duration);
        self.enter(RunPhase::Running);

        let mut handles: Vec<JoinHandle<WorkerResult>> = Vec::with_capacity(threads);
        for worker_id in 0..threads {
            let worker = Worker::new(
                worker_id,
                &self.config,
                Arc::clone(&self.operation),
                Arc::clone(&counters),
                Arc::clone(&stop),
            );

            match thread::Builder::new()
                .name(format!("load-worker-{}", worker_id))
                .spawn(move || worker.run())
            {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    error!("Worker {}: failed to spawn: {}", worker_id, e);
                    counters.record_failure();
                    if counters.worker_exited() {
                        stop.stop(StopReason::WorkersExited);
                    }
                }
            }
        }

        // Progress reporting (if not quiet)
        let progress = if self.config.quiet {
            None
        } else {
            let counters = Arc::clone(&counters);
            let stop = Arc::clone(&stop);
            let duration = self.config.duration;
            thread::Builder::new()
                .name("progress".to_string())
                .spawn(move || report_progress(&counters, &stop, duration))
                .ok()
        };

        let reason = match deadline {
            Some(deadline) => stop.wait_until(deadline),
            None => stop.wait(),
        };
        self.enter(RunPhase::Stopping);
        info!("Stopping: {}", reason);

        let results: Vec<WorkerResult> = handles
            .into_iter()
            .filter_map(|h| match h.join() {
                Ok(result) => Some(result),
                Err(_) => {
                    error!("Worker thread panicked");
                    counters.record_failure();
                    None
                }
            })
            .collect();

        let duration = start_time.elapsed();

        if let Some(progress) = progress {
            let _ = progress.join();
        }

        let result = self.merge_results(results, &counters, reason, duration);
        self.enter(RunPhase::Done);
        result
    }

    /// Merge worker results into the run summary
    fn merge_results(
        &self,
        results: Vec<WorkerResult>,
        counters: &LoadCounters,
        stop_reason: StopReason,
        duration: Duration,
    ) -> BenchmarkResult {
        let mut histogram = new_latency_histogram();
        let mut worker_errors = Vec::new();
        for result in &results {
            histogram.add(&result.histogram).ok();
            if let Some(ref error) = result.error {
                worker_errors.push(WorkerFailure {
                    worker_id: result.worker_id,
                    error: error.clone(),
                });
            }
        }

        let total_ops = counters.operations();
        let secs = duration.as_secs_f64();
        let throughput = if secs > 0.0 { total_ops as f64 / secs } else { 0.0 };

        BenchmarkResult {
            algorithm: self.config.algorithm,
            threads: self.config.threads,
            requested_threads: self.config.requested_threads,
            buffer_size: self.config.buffer_size,
            batch_size: self.config.batch_size,
            stop_reason,
            duration,
            total_ops,
            throughput,
            failed_workers: counters.failures(),
            worker_errors,
            histogram,
        }
    }
}

/// Report progress during the run
fn report_progress(counters: &LoadCounters, stop: &StopSignal, duration: Duration) {
    let pb = ProgressBar::new(duration.as_secs().max(1));
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}s/{len}s | {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }

    let start = Instant::now();
    let mut last_ops = 0u64;
    let mut last_time = start;

    while !stop.is_stopped() {
        pb.set_position(start.elapsed().as_secs());

        let now = Instant::now();
        let interval = now.duration_since(last_time).as_secs_f64();
        if interval >= 1.0 {
            let ops = counters.operations();
            let throughput = (ops - last_ops) as f64 / interval;
            pb.set_message(format!(
                "{} ops/s, total: {}",
                format_throughput(throughput),
                format_count(ops)
            ));
            last_ops = ops;
            last_time = now;
        }

        thread::sleep(Duration::from_millis(100));
    }

    pb.finish_with_message(format!(
        "Complete - {} total ops",
        format_count(counters.operations())
    ));
}
