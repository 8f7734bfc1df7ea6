//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Multi-threaded CPU load generator hashing or signing random data
#[derive(Parser, Debug, Clone)]
#[command(name = "hashload")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Load Parameters =====
    /// Number of worker threads (0 = detected parallelism)
    #[arg(short = 'n', long = "threads", default_value_t = 0)]
    pub threads: usize,

    /// Run duration, e.g. 90s, 1h30m, 1d8h15m30s
    #[arg(short = 'd', long = "duration", value_parser = humantime::parse_duration, default_value = "90m")]
    pub duration: Duration,

    /// Size of the random message in bytes
    #[arg(short = 'b', long = "buffer-size", default_value_t = 1024)]
    pub buffer_size: usize,

    /// Hash or signature algorithm (see --list)
    #[arg(short = 'a', long = "algorithm", default_value = "sha256")]
    pub algorithm: String,

    /// Operations per batch between cancellation checks
    #[arg(long = "batch-size", default_value_t = 64)]
    pub batch_size: u64,

    // ===== Output Options =====
    /// Write the final result as JSON to this file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print supported algorithms and exit
    #[arg(long = "list")]
    pub list: bool,

    /// Quiet mode (errors only, no progress)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument values
    pub fn validate(&self) -> Result<(), String> {
        if self.duration.is_zero() {
            return Err("--duration must be greater than zero".to_string());
        }

        // Run deadline must be representable
        if Instant::now().checked_add(self.duration).is_none() {
            return Err(format!(
                "--duration {} is too large",
                humantime::format_duration(self.duration)
            ));
        }

        if self.buffer_size == 0 {
            return Err("--buffer-size must be at least 1".to_string());
        }

        if self.batch_size == 0 {
            return Err("--batch-size must be at least 1".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["test"]);
        assert_eq!(args.threads, 0);
        assert_eq!(args.duration, Duration::from_secs(90 * 60));
        assert_eq!(args.buffer_size, 1024);
        assert_eq!(args.algorithm, "sha256");
        assert_eq!(args.batch_size, 64);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_duration_formats() {
        let args = CliArgs::parse_from(["test", "-d", "2s"]);
        assert_eq!(args.duration, Duration::from_secs(2));

        let args = CliArgs::parse_from(["test", "--duration", "1h30m"]);
        assert_eq!(args.duration, Duration::from_secs(5400));

        let args = CliArgs::parse_from(["test", "--duration", "1d8h15m30s"]);
        assert_eq!(args.duration, Duration::from_secs(86400 + 8 * 3600 + 15 * 60 + 30));
    }

    #[test]
    fn test_bad_duration_rejected() {
        assert!(CliArgs::try_parse_from(["test", "-d", "soon"]).is_err());
    }

    #[test]
    fn test_load_args() {
        let args = CliArgs::parse_from([
            "test", "-n", "4", "-b", "4096", "-a", "ED25519", "--batch-size", "16",
        ]);
        assert_eq!(args.threads, 4);
        assert_eq!(args.buffer_size, 4096);
        assert_eq!(args.algorithm, "ED25519");
        assert_eq!(args.batch_size, 16);
    }

    #[test]
    fn test_validation_zero_values() {
        let args = CliArgs::parse_from(["test", "-b", "0"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["test", "--batch-size", "0"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["test", "-d", "0s"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(CliArgs::try_parse_from(["test", "-q", "-v"]).is_err());
        assert!(CliArgs::try_parse_from(["test", "-q"]).is_ok());
        assert!(CliArgs::try_parse_from(["test", "-v"]).is_ok());
    }

    #[test]
    fn test_validation_duration_too_large() {
        let args = CliArgs::parse_from(["test", "-d", "500000000000years"]);
        let err = args.validate().unwrap_err();
        assert!(err.contains("too large"));

        let args = CliArgs::parse_from(["test", "-d", "100years"]);
        assert!(args.validate().is_ok());
    }
}
