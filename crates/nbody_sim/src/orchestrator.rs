use std::time::{Duration, Instant};

use bevy::log::{debug, info};
use bevy::tasks::{ComputeTaskPool, TaskPool};
use nbody_core::{BLOCK_SIZE, Dispatch, ForceBlock, NBodyError, ParticleBlock, Result, zeroed_forces};
use nbody_physics::{compute_block_forces, compute_forces, integrate, integrate_block};

/// Where a [`Simulation`] is in its lifecycle.
///
/// The force and integration phases alternate inside [`simulate`] and are
/// never observable from outside a run, so only the two resting states are
/// modelled. A simulation runs once: `run` on a drained simulation is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    /// Blocks allocated, nothing run yet
    Idle,
    /// All timesteps done, forces cleared
    Drained,
}

/// Wall-clock marks taken by [`simulate`]
#[derive(Debug, Clone, Copy)]
pub struct PhaseTimings {
    /// Call start
    pub start: Instant,
    /// Dispatch resources ready
    pub dispatched: Instant,
    /// Every timestep finished and visible to the caller
    pub completed: Instant,
    /// Nothing left in flight
    pub drained: Instant,
}

impl PhaseTimings {
    pub fn as_array(&self) -> [Instant; 4] {
        [self.start, self.dispatched, self.completed, self.drained]
    }

    pub fn warm_up(&self) -> Duration {
        self.dispatched - self.start
    }

    pub fn execution(&self) -> Duration {
        self.completed - self.dispatched
    }

    pub fn flush(&self) -> Duration {
        self.drained - self.completed
    }

    /// Pair interactions per second, in billions
    pub fn throughput_gpairs(&self, total_particles: usize, timesteps: usize) -> f64 {
        let secs = self.execution().as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        let n = total_particles as f64;
        n * n / 1.0e9 * timesteps as f64 / secs
    }
}

fn task_pool() -> &'static TaskPool {
    ComputeTaskPool::get_or_init(TaskPool::default)
}

/// One task per destination block. Each task owns the only mutable borrow of
/// its force block; all tasks share the particle slice. The scope returns
/// once every task is done, which is the barrier before integration.
fn force_phase<const B: usize>(
    pool: &TaskPool,
    particles: &[ParticleBlock<B>],
    forces: &mut [ForceBlock<B>],
) {
    pool.scope(|scope| {
        for (i, force) in forces.iter_mut().enumerate() {
            scope.spawn(async move { compute_block_forces(force, i, particles) });
        }
    });
}

/// One task per block; ends with every force block cleared.
fn integrate_phase<const B: usize>(
    pool: &TaskPool,
    particles: &mut [ParticleBlock<B>],
    forces: &mut [ForceBlock<B>],
    time_interval: f32,
) {
    pool.scope(|scope| {
        for (block, force) in particles.iter_mut().zip(forces.iter_mut()) {
            scope.spawn(async move { integrate_block(block, force, time_interval) });
        }
    });
}

/// Run `timesteps` force/integrate rounds over all blocks.
///
/// `forces` must be all zero on entry and is all zero again on return.
/// Sizes are not checked here; see [`Simulation::new`].
pub fn simulate<const B: usize>(
    particles: &mut [ParticleBlock<B>],
    forces: &mut [ForceBlock<B>],
    timesteps: usize,
    time_interval: f32,
    dispatch: Dispatch,
) -> PhaseTimings {
    let start = Instant::now();

    let pool = match dispatch {
        Dispatch::Sequential => None,
        Dispatch::TaskPool => Some(task_pool()),
    };
    let dispatched = Instant::now();

    for step in 0..timesteps {
        match pool {
            Some(pool) => {
                force_phase(pool, particles, forces);
                integrate_phase(pool, particles, forces, time_interval);
            }
            None => {
                compute_forces(particles, forces);
                integrate(particles, forces, time_interval);
            }
        }
        debug!("timestep {}/{} done", step + 1, timesteps);
    }
    let completed = Instant::now();

    // Every phase joins its own scope, so nothing is outstanding here
    let drained = Instant::now();

    PhaseTimings {
        start,
        dispatched,
        completed,
        drained,
    }
}

/// Owns the particle and force arrays for the lifetime of a run
pub struct Simulation<const B: usize = BLOCK_SIZE> {
    particles: Vec<ParticleBlock<B>>,
    forces: Vec<ForceBlock<B>>,
    timesteps: usize,
    time_interval: f32,
    dispatch: Dispatch,
    phase: SimPhase,
}

impl<const B: usize> Simulation<B> {
    pub fn new(
        particles: Vec<ParticleBlock<B>>,
        timesteps: usize,
        time_interval: f32,
        dispatch: Dispatch,
    ) -> Result<Self> {
        if particles.is_empty() {
            return Err(NBodyError::invalid("at least one particle block is required"));
        }
        if timesteps == 0 {
            return Err(NBodyError::invalid("timesteps must be at least 1"));
        }
        if !(time_interval > 0.0 && time_interval.is_finite()) {
            return Err(NBodyError::invalid(format!(
                "time interval must be positive, got {time_interval}"
            )));
        }

        let forces = zeroed_forces(particles.len());
        Ok(Self {
            particles,
            forces,
            timesteps,
            time_interval,
            dispatch,
            phase: SimPhase::Idle,
        })
    }

    pub fn n_blocks(&self) -> usize {
        self.particles.len()
    }

    pub fn total_particles(&self) -> usize {
        self.particles.len() * B
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn particles(&self) -> &[ParticleBlock<B>] {
        &self.particles
    }

    pub fn forces(&self) -> &[ForceBlock<B>] {
        &self.forces
    }

    pub fn run(&mut self) -> Result<PhaseTimings> {
        if self.phase == SimPhase::Drained {
            return Err(NBodyError::invalid("simulation has already run"));
        }
        info!(
            "Simulating {} particles in {} blocks for {} timesteps ({})",
            self.total_particles(),
            self.n_blocks(),
            self.timesteps,
            self.dispatch.name()
        );

        let timings = simulate(
            &mut self.particles,
            &mut self.forces,
            self.timesteps,
            self.time_interval,
            self.dispatch,
        );
        self.phase = SimPhase::Drained;

        info!(
            "Simulation finished in {:.3}s ({:.3} Gpairs/s)",
            timings.execution().as_secs_f64(),
            timings.throughput_gpairs(self.total_particles(), self.timesteps)
        );
        Ok(timings)
    }
}
