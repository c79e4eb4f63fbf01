use std::fs;
use std::path::{Path, PathBuf};

use nbody_core::{BLOCK_SIZE, Result, SimConfig};
use nbody_physics::Verification;
use serde::{Deserialize, Serialize};

use crate::orchestrator::PhaseTimings;

/// Where and how loudly results are reported
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Suppress the results banner
    pub quiet: bool,
    /// Machine-readable result file, if any
    pub json_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            json_path: Some(PathBuf::from("test_result.json")),
        }
    }
}

/// Summary of one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub benchmark: String,
    pub dispatch: String,
    pub datatype: String,
    pub total_particles: usize,
    pub block_size: usize,
    pub timesteps: usize,
    pub verification: Verification,
    /// Seconds
    pub warm_up: f64,
    pub execution: f64,
    pub flush: f64,
    /// Gpairs/s
    pub throughput: f64,
}

impl RunReport {
    pub fn new(config: &SimConfig, timings: &PhaseTimings, verification: Verification) -> Self {
        let total_particles = config.total_particles();
        Self {
            benchmark: "nbody".to_string(),
            dispatch: config.dispatch.name().to_string(),
            datatype: "float".to_string(),
            total_particles,
            block_size: BLOCK_SIZE,
            timesteps: config.timesteps,
            verification,
            warm_up: timings.warm_up().as_secs_f64(),
            execution: timings.execution().as_secs_f64(),
            flush: timings.flush().as_secs_f64(),
            throughput: timings.throughput_gpairs(total_particles, config.timesteps),
        }
    }

    pub fn banner(&self) -> String {
        let mut lines = Vec::new();
        lines.push("==================== RESULTS =====================".to_string());
        lines.push(format!("  Benchmark: N-Body ({})", self.dispatch));
        lines.push(format!("  Total particles: {}", self.total_particles));
        lines.push(format!("  Timesteps: {}", self.timesteps));
        lines.push(format!("  Verification: {}", self.verification));
        lines.push(format!("  Warm up time (secs): {:.6}", self.warm_up));
        lines.push(format!("  Execution time (secs): {:.6}", self.execution));
        lines.push(format!("  Flush time (secs): {:.6}", self.flush));
        lines.push(format!("  Throughput (gpairs/s): {:.6}", self.throughput));
        lines.push("==================================================".to_string());
        lines.join("\n")
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Print and/or persist according to `config`
    pub fn emit(&self, config: &ReportConfig) -> Result<()> {
        if !config.quiet {
            println!("{}", self.banner());
        }
        if let Some(path) = &config.json_path {
            self.write_json(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn sample_report() -> RunReport {
        let start = Instant::now();
        let timings = PhaseTimings {
            start,
            dispatched: start + Duration::from_millis(10),
            completed: start + Duration::from_millis(2010),
            drained: start + Duration::from_millis(2011),
        };
        let config = SimConfig { num_particles: 2 * BLOCK_SIZE, timesteps: 4, ..SimConfig::default() };
        RunReport::new(&config, &timings, Verification::Success)
    }

    #[test]
    fn test_throughput_from_execution_window() {
        let report = sample_report();
        let n = (2 * BLOCK_SIZE) as f64;
        let expected = n * n / 1.0e9 * 4.0 / 2.0;
        assert!((report.throughput - expected).abs() < 1e-9 * expected.max(1.0));
        assert!((report.warm_up - 0.010).abs() < 1e-9);
        assert!((report.flush - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_banner_lists_outcome() {
        let banner = sample_report().banner();
        assert!(banner.contains("Verification: successful"));
        assert!(banner.contains(&format!("Total particles: {}", 2 * BLOCK_SIZE)));
    }

    #[test]
    fn test_json_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("result.json");
        let config = ReportConfig { quiet: true, json_path: Some(path.clone()) };

        sample_report().emit(&config).unwrap();

        let back: RunReport = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back.verification, Verification::Success);
        assert_eq!(back.timesteps, 4);
        assert_eq!(back.benchmark, "nbody");
    }
}
