//! Utility modules

pub mod error;

pub use error::{ComputeError, LoadError, Result};
