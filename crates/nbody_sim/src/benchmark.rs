//! The benchmark around the simulation: particle setup, the timed run,
//! persistence of the final state and verification against a reference.

use bevy::log::{info, warn};
use nbody_core::{BLOCK_SIZE, ParticleBlock, Result, SimConfig};
use nbody_physics::particle::generate_blocks;
use nbody_physics::{ComparisonStats, Verification, verify};
use nbody_storage::{ParticleFiles, load_blocks, load_reference, save_blocks};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::orchestrator::Simulation;
use crate::report::RunReport;

/// Initial particles for `config`: read from the `.in` file when it already
/// exists, otherwise generated from the seed and written there first.
pub fn prepare_particles(config: &SimConfig) -> Result<Vec<ParticleBlock>> {
    config.validate()?;
    let files = ParticleFiles::for_config(config);
    let input = files.input_path();
    let n_blocks = config.num_blocks();

    if input.exists() {
        info!("Reusing initial particles from {}", input.display());
        return load_blocks(&input, n_blocks);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let blocks = generate_blocks::<BLOCK_SIZE>(config, n_blocks, &mut rng);
    save_blocks(&blocks, &input)?;
    info!(
        "Generated {} particles ({} blocks) into {}",
        config.total_particles(),
        n_blocks,
        input.display()
    );
    Ok(blocks)
}

pub struct BenchmarkOutcome {
    pub report: RunReport,
    pub stats: Option<ComparisonStats>,
}

/// Simulate, save the final state and verify it
pub fn run_benchmark(config: &SimConfig, particles: Vec<ParticleBlock>) -> Result<BenchmarkOutcome> {
    config.validate()?;
    let mut sim = Simulation::new(particles, config.timesteps, config.time_interval, config.dispatch)?;
    let timings = sim.run()?;
    let particles = sim.particles();

    let files = ParticleFiles::for_config(config);
    let output = files.output_path();
    save_blocks(particles, &output)?;
    info!("Final state written to {}", output.display());

    let reference = load_reference(&files, config.num_blocks())?;
    let (verification, stats) = verify(particles, reference.as_deref());
    match (verification, &stats) {
        (Verification::Success, Some(stats)) => info!(
            "Result validation: OK ({} of {} particles differ)",
            stats.mismatched, stats.total
        ),
        (Verification::Fail, Some(stats)) => warn!(
            "Relative error[{}]: {:.9} ({:.3}% of particles differ)",
            stats.mismatched,
            stats.mean_relative_error,
            stats.mismatch_percent()
        ),
        _ => info!("No reference at {}, verification skipped", files.reference_path().display()),
    }

    Ok(BenchmarkOutcome {
        report: RunReport::new(config, &timings, verification),
        stats,
    })
}
