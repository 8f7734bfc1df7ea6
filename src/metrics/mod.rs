//! Result reporting
//!
//! This module provides:
//! - JSON export of a finished run
//! - Number formatting for console output

pub mod reporter;

pub use reporter::{format_count, format_throughput, write_json, ResultReport};
