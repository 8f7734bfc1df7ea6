//! Load configuration derived from CLI arguments

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use super::cli::CliArgs;
use crate::workload::Algorithm;

/// Complete, immutable load configuration
#[derive(Debug, Clone)]
pub struct LoadConfig {
    // Workload
    pub algorithm: Algorithm,
    pub buffer_size: usize,
    pub batch_size: u64,

    // Parallelism
    pub threads: usize,
    /// Thread count asked for, when it was clamped down
    pub requested_threads: Option<usize>,

    // Timing
    pub duration: Duration,

    // Output
    pub output_path: Option<PathBuf>,
    pub quiet: bool,
}

impl LoadConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        Self::from_cli_with_parallelism(args, available_parallelism())
    }

    /// Create configuration against a known parallelism
    pub fn from_cli_with_parallelism(args: &CliArgs, available: usize) -> Result<Self, String> {
        args.validate()?;

        let algorithm = Algorithm::parse(&args.algorithm)
            .ok_or_else(|| format!("unknown algorithm: {}", args.algorithm))?;

        let threads = effective_threads(args.threads, available);
        let requested_threads = (args.threads > threads).then_some(args.threads);
        if let Some(requested) = requested_threads {
            warn!(
                "Requested {} threads, but only {} can run in parallel on this machine; using {}",
                requested, available, threads
            );
        }

        Ok(Self {
            algorithm,
            buffer_size: args.buffer_size,
            batch_size: args.batch_size,

            threads,
            requested_threads,

            duration: args.duration,

            output_path: args.output.clone(),
            quiet: args.quiet,
        })
    }
}

/// Detected parallelism of this machine (at least 1)
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

/// Resolve the worker count: 0 means all of `available`, more is clamped
pub fn effective_threads(requested: usize, available: usize) -> usize {
    let available = available.max(1);
    if requested == 0 {
        available
    } else {
        requested.min(available)
    }
}
