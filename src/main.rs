use std::path::PathBuf;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use nbody_core::{DEFAULT_NAME, DEFAULT_SEED, DEFAULT_TIME_INTERVAL, Dispatch, SimConfig};
use nbody_sim::{BenchmarkConfig, BenchmarkPlugin, ReportConfig};

/// Blocked direct-sum N-body benchmark
#[derive(Parser, Debug)]
#[command(name = "nbody")]
struct Args {
    /// Number of particles, rounded up to whole blocks
    num_particles: usize,
    /// Number of timesteps to simulate
    timesteps: usize,
    /// Seed for the initial particle distribution
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Timestep in seconds
    #[arg(long, default_value_t = DEFAULT_TIME_INTERVAL)]
    dt: f32,
    /// Prefix of the particle files
    #[arg(long, default_value = DEFAULT_NAME)]
    name: String,
    /// Directory holding the particle files
    #[arg(long, default_value = ".")]
    dir: PathBuf,
    /// Run both phases on the calling thread only
    #[arg(long)]
    sequential: bool,
    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,
    /// Result file
    #[arg(long, default_value = "test_result.json")]
    json: PathBuf,
}

fn main() -> AppExit {
    let args = Args::parse();

    let sim = SimConfig {
        time_interval: args.dt,
        seed: args.seed,
        name: args.name,
        num_particles: args.num_particles,
        timesteps: args.timesteps,
        dispatch: if args.sequential { Dispatch::Sequential } else { Dispatch::TaskPool },
        work_dir: args.dir,
        ..SimConfig::default()
    };

    let report = ReportConfig {
        quiet: args.quiet,
        json_path: Some(args.json),
    };
    let level = if args.quiet { Level::WARN } else { Level::INFO };

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin { level, ..default() })
        .insert_resource(BenchmarkConfig { sim, report })
        .add_plugins(BenchmarkPlugin)
        .run()
}
