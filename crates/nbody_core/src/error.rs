//! Error types for the benchmark.
//!
//! Numeric degeneracy never shows up here: coincident particles are handled
//! inside the force kernel, and a failed verification is a reported outcome.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NBodyError {
    /// Rejected before the simulation starts (particle count, timesteps, dt)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A particle file exists but does not hold what the run expects
    #[error("Storage error in {}: {message}", .path.display())]
    Storage { path: PathBuf, message: String },

    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl NBodyError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NBodyError>;
