use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use hashload::benchmark::{LoadCounters, Orchestrator, RunPhase, StopReason, StopSignal};
use hashload::config::{available_parallelism, LoadConfig};
use hashload::workload::Algorithm;

fn config(algorithm: Algorithm, threads: usize, duration: Duration) -> LoadConfig {
    LoadConfig {
        algorithm,
        buffer_size: 1024,
        batch_size: 64,
        threads: threads.min(available_parallelism()),
        requested_threads: None,
        duration,
        output_path: None,
        quiet: true,
    }
}

#[test]
fn timed_run_reports_throughput() {
    let duration = Duration::from_millis(500);
    let mut orchestrator = Orchestrator::new(config(Algorithm::Sha256, 4, duration)).unwrap();

    let start = Instant::now();
    let result = orchestrator.run_with_stop(Arc::new(StopSignal::new()));
    let elapsed = start.elapsed();

    assert_eq!(result.stop_reason, StopReason::Timeout);
    assert!(elapsed >= duration);
    assert!(elapsed < duration + Duration::from_secs(3));
    assert!(result.total_ops > 0);
    assert_eq!(result.total_ops % 64, 0);
    assert!(result.throughput > 0.0);
    assert_eq!(result.failed_workers, 0);
    assert_eq!(result.buffer_size, 1024);
    assert_eq!(orchestrator.phase(), RunPhase::Done);
}

#[test]
fn interrupt_is_not_reported_as_timeout() {
    let mut orchestrator =
        Orchestrator::new(config(Algorithm::Sha512, 2, Duration::from_secs(60))).unwrap();

    let stop = Arc::new(StopSignal::new());
    let remote = Arc::clone(&stop);
    let interrupter = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        remote.stop(StopReason::Interrupt);
    });

    let start = Instant::now();
    let result = orchestrator.run_with_stop(stop);
    interrupter.join().unwrap();

    assert_eq!(result.stop_reason, StopReason::Interrupt);
    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(result.total_ops > 0);
}

#[test]
fn every_algorithm_runs() {
    for algorithm in Algorithm::ALL {
        let mut cfg = config(algorithm, 1, Duration::from_millis(50));
        cfg.batch_size = 1;
        let mut orchestrator = Orchestrator::new(cfg).unwrap();
        let result = orchestrator.run_with_stop(Arc::new(StopSignal::new()));

        assert_eq!(result.algorithm, algorithm);
        assert!(result.total_ops > 0, "{} made no progress", algorithm);
        assert_eq!(result.failed_workers, 0);
    }
}

#[test]
fn pre_stopped_run_drains_one_batch_per_worker() {
    let mut orchestrator =
        Orchestrator::new(config(Algorithm::Md5, 2, Duration::from_secs(60))).unwrap();
    let stop = Arc::new(StopSignal::new());
    stop.stop(StopReason::Interrupt);

    let result = orchestrator.run_with_stop(stop);

    assert_eq!(result.stop_reason, StopReason::Interrupt);
    assert_eq!(result.total_ops, 64 * result.threads as u64);
}

#[test]
fn counters_start_at_zero() {
    let counters = LoadCounters::new(4);
    assert_eq!(counters.operations(), 0);
}
