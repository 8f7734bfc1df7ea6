//! Workload definitions
//!
//! Maps algorithm names to the hash or signature primitive each worker runs.

pub mod algorithm;
pub mod operation;

pub use algorithm::Algorithm;
pub use operation::{Compute, Operation};
