use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{NBodyError, Result};

/// How the per-block work of each phase is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Dispatch {
    /// Everything on the calling thread, blocks in index order
    Sequential,
    /// One task per block on the shared compute task pool
    #[default]
    TaskPool,
}

impl Dispatch {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::TaskPool => "task_pool",
        }
    }
}

/// Benchmark run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Edge lengths of the initial box (m)
    pub domain_size: [f32; 3],
    /// Masses are drawn from [0, mass_maximum) (kg)
    pub mass_maximum: f32,
    /// Timestep (s)
    pub time_interval: f32,
    /// Seed for the initial particle distribution
    pub seed: u64,
    /// Prefix of the particle files
    pub name: String,
    /// Requested particle count, rounded up to whole blocks
    pub num_particles: usize,
    pub timesteps: usize,
    pub dispatch: Dispatch,
    /// Directory holding the particle files
    pub work_dir: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            domain_size: DEFAULT_DOMAIN_SIZE,
            mass_maximum: DEFAULT_MASS_MAXIMUM,
            time_interval: DEFAULT_TIME_INTERVAL,
            seed: DEFAULT_SEED,
            name: DEFAULT_NAME.to_string(),
            num_particles: 2 * BLOCK_SIZE,
            timesteps: 10,
            dispatch: Dispatch::default(),
            work_dir: PathBuf::from("."),
        }
    }
}

impl SimConfig {
    /// Number of blocks needed to hold `num_particles`
    pub fn num_blocks(&self) -> usize {
        self.num_particles.div_ceil(BLOCK_SIZE).max(1)
    }

    /// Particle count actually simulated
    pub fn total_particles(&self) -> usize {
        self.num_blocks() * BLOCK_SIZE
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(NBodyError::invalid("particle count must be at least 1"));
        }
        if self.timesteps == 0 {
            return Err(NBodyError::invalid("timesteps must be at least 1"));
        }
        if !(self.time_interval > 0.0 && self.time_interval.is_finite()) {
            return Err(NBodyError::invalid(format!(
                "time interval must be positive, got {}",
                self.time_interval
            )));
        }
        if self.domain_size.iter().any(|&d| !(d > 0.0 && d.is_finite())) {
            return Err(NBodyError::invalid(format!(
                "domain size must be positive, got {:?}",
                self.domain_size
            )));
        }
        if !(self.mass_maximum > 0.0 && self.mass_maximum.is_finite()) {
            return Err(NBodyError::invalid(format!(
                "mass maximum must be positive, got {}",
                self.mass_maximum
            )));
        }
        if self.name.is_empty() {
            return Err(NBodyError::invalid("file name prefix must not be empty"));
        }
        Ok(())
    }
}
