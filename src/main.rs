//! hashload - multi-threaded CPU load generator
//!
//! Repeatedly hashes or signs a random buffer on N threads for a fixed
//! duration, then reports total operations and throughput.

use std::io::IsTerminal;

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use hashload::benchmark::Orchestrator;
use hashload::config::{CliArgs, LoadConfig};
use hashload::metrics::write_json;
use hashload::utils::LoadError;
use hashload::workload::Algorithm;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &LoadConfig) {
    if config.quiet {
        return;
    }

    println!("hashload v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!("Algorithm: {}", config.algorithm);
    println!(
        "Threads: {}, Buffer: {} bytes, Batch: {}",
        config.threads, config.buffer_size, config.batch_size
    );
    println!("Duration: {}", humantime::format_duration(config.duration));
    println!("====================================\n");
}

fn print_algorithms() {
    for alg in Algorithm::ALL {
        println!("{:12} {}", alg.as_str(), alg.description());
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    if args.list {
        print_algorithms();
        return Ok(());
    }

    info!("Starts");

    // Build configuration
    let config = LoadConfig::from_cli(&args).map_err(LoadError::Config)?;

    print_banner(&config);

    // Bind algorithm and generate keys before any worker starts
    let mut orchestrator = Orchestrator::new(config.clone())?;

    let result = orchestrator.run()?;
    result.print_summary();

    // Export to JSON if requested
    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        write_json(&result, output_path)?;
    }

    info!("Done");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
