//! Configuration module

pub mod cli;
pub mod load_config;

pub use cli::CliArgs;
pub use load_config::{available_parallelism, effective_threads, LoadConfig};
