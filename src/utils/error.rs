//! Error types for hashload

use std::io;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Failed to install signal handlers: {0}")]
    Signal(io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Errors raised inside a worker while computing
///
/// These never cross the worker boundary: the worker logs them and exits.
#[derive(Error, Debug)]
pub enum ComputeError {
    #[error("random source failed: {0}")]
    RandomSource(#[from] rand::Error),

    #[error("signing failed: {0}")]
    Signing(String),
}

pub type Result<T> = std::result::Result<T, LoadError>;
