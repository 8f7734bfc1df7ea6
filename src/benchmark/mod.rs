//! Load orchestration and workers
//!
//! This module provides the multi-threaded load execution system:
//! - LoadCounters: Atomic operation counter shared by all workers
//! - StopSignal: One-shot cancellation with the reason it fired
//! - Worker: Tight compute loop polling the stop signal between batches
//! - Orchestrator: Spawns workers, waits for timeout or interrupt, merges results

pub mod counters;
pub mod orchestrator;
pub mod signals;
pub mod stop;
pub mod worker;

pub use counters::LoadCounters;
pub use orchestrator::{BenchmarkResult, Orchestrator, RunPhase, WorkerFailure};
pub use signals::InterruptListener;
pub use stop::{StopReason, StopSignal};
pub use worker::{Worker, WorkerResult};
