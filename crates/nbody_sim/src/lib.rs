pub mod benchmark;
pub mod orchestrator;
pub mod pipeline;
pub mod report;

pub use orchestrator::{PhaseTimings, SimPhase, Simulation, simulate};
pub use pipeline::{BenchmarkConfig, BenchmarkPlugin};
pub use report::{ReportConfig, RunReport};
