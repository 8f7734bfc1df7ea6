//! Result reporting - JSON export and number formatting

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::benchmark::BenchmarkResult;
use crate::utils::Result;

/// Serializable view of a finished run
#[derive(Debug, Serialize)]
pub struct ResultReport {
    pub algorithm: String,
    pub threads: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_threads: Option<usize>,
    pub buffer_size: usize,
    pub batch_size: u64,
    pub stop_reason: String,
    pub duration_secs: f64,
    pub total_ops: u64,
    pub throughput: f64,
    pub failed_workers: u64,
    pub worker_errors: Vec<WorkerErrorReport>,
    pub latency: LatencyReport,
}

#[derive(Debug, Serialize)]
pub struct WorkerErrorReport {
    pub worker_id: usize,
    pub error: String,
}

/// Per-operation latency in microseconds, from the mean of each batch
#[derive(Debug, Serialize)]
pub struct LatencyReport {
    pub mean_us: f64,
    pub p50_us: f64,
    pub p99_us: f64,
    pub max_us: f64,
}

impl ResultReport {
    pub fn from_result(result: &BenchmarkResult) -> Self {
        Self {
            algorithm: result.algorithm.to_string(),
            threads: result.threads,
            requested_threads: result.requested_threads,
            buffer_size: result.buffer_size,
            batch_size: result.batch_size,
            stop_reason: result.stop_reason.to_string(),
            duration_secs: result.duration.as_secs_f64(),
            total_ops: result.total_ops,
            throughput: result.throughput,
            failed_workers: result.failed_workers,
            worker_errors: result
                .worker_errors
                .iter()
                .map(|f| WorkerErrorReport {
                    worker_id: f.worker_id,
                    error: f.error.clone(),
                })
                .collect(),
            latency: LatencyReport {
                mean_us: result.histogram.mean() / 1000.0,
                p50_us: result.percentile_us(50.0),
                p99_us: result.percentile_us(99.0),
                max_us: result.histogram.max() as f64 / 1000.0,
            },
        }
    }
}

/// Write the result to a JSON file
pub fn write_json(result: &BenchmarkResult, path: &Path) -> Result<()> {
    let report = ResultReport::from_result(result);
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, &report)?;
    writeln!(file)?;
    file.flush()?;
    Ok(())
}

/// Format throughput without meaningless decimals
/// Examples: 1,234,567 ops/s, 987,654 ops/s
pub fn format_throughput(throughput: f64) -> String {
    let value = throughput as u64;
    format_count(value)
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
