//! hashload library
//!
//! Multi-threaded CPU load generator: hashes or signs random data on every
//! core for a fixed duration and reports aggregate throughput.

pub mod benchmark;
pub mod config;
pub mod metrics;
pub mod utils;
pub mod workload;
