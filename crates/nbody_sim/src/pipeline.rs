use bevy::prelude::*;
use nbody_core::{ParticleBlock, SimConfig};

use crate::benchmark::{prepare_particles, run_benchmark};
use crate::report::ReportConfig;

/// Run settings, inserted by the binary before the app starts
#[derive(Resource, Debug, Clone, Default)]
pub struct BenchmarkConfig {
    pub sim: SimConfig,
    pub report: ReportConfig,
}

/// Initial particles, present between setup and the run
#[derive(Resource)]
pub struct BenchmarkState {
    pub particles: Vec<ParticleBlock>,
}

/// Bevy plugin driving a single benchmark run in a headless app
pub struct BenchmarkPlugin;

impl Plugin for BenchmarkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BenchmarkConfig>()
            .add_systems(Startup, setup_particles)
            .add_systems(Update, benchmark_run);
    }
}

fn setup_particles(
    mut commands: Commands,
    config: Res<BenchmarkConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match prepare_particles(&config.sim) {
        Ok(particles) => commands.insert_resource(BenchmarkState { particles }),
        Err(err) => {
            // Also reached for a config that fails validation
            error!("Particle setup failed: {err}");
            exit.send(AppExit::error());
        }
    }
}

/// Simulate, save, verify and report; exits the app with a failure code
/// when verification fails or any step errors.
fn benchmark_run(
    mut commands: Commands,
    config: Res<BenchmarkConfig>,
    state: Option<ResMut<BenchmarkState>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut state) = state else {
        return;
    };
    let particles = std::mem::take(&mut state.particles);
    commands.remove_resource::<BenchmarkState>();

    let outcome = match run_benchmark(&config.sim, particles) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Benchmark failed: {err}");
            exit.send(AppExit::error());
            return;
        }
    };

    if let Err(err) = outcome.report.emit(&config.report) {
        error!("Could not write report: {err}");
        exit.send(AppExit::error());
        return;
    }

    if outcome.report.verification.is_failure() {
        exit.send(AppExit::error());
    } else {
        exit.send(AppExit::Success);
    }
}
