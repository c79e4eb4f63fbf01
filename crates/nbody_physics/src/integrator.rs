//! Explicit per-block time integration.
//!
//! The position update uses the old velocity plus half of this step's
//! velocity change, after which the velocity takes the full change:
//!
//! ```text
//! dv  = F * dt / m
//! x  += v + dv * dt / 2
//! v  += dv
//! F   = 0
//! ```

use nbody_core::{ForceBlock, ParticleBlock};

/// Advance one block by `dt` using its accumulated force, then clear the
/// force block for the next accumulation.
pub fn integrate_block<const B: usize>(
    particles: &mut ParticleBlock<B>,
    forces: &mut ForceBlock<B>,
    time_interval: f32,
) {
    for e in 0..B {
        let mass = particles.mass[e];
        let velocity_x = particles.velocity_x[e];
        let velocity_y = particles.velocity_y[e];
        let velocity_z = particles.velocity_z[e];

        let time_by_mass = time_interval / mass;
        let half_time_interval = 0.5 * time_interval;

        let velocity_change_x = forces.fx[e] * time_by_mass;
        let velocity_change_y = forces.fy[e] * time_by_mass;
        let velocity_change_z = forces.fz[e] * time_by_mass;

        particles.position_x[e] += velocity_x + velocity_change_x * half_time_interval;
        particles.position_y[e] += velocity_y + velocity_change_y * half_time_interval;
        particles.position_z[e] += velocity_z + velocity_change_z * half_time_interval;

        particles.velocity_x[e] = velocity_x + velocity_change_x;
        particles.velocity_y[e] = velocity_y + velocity_change_y;
        particles.velocity_z[e] = velocity_z + velocity_change_z;
    }
    forces.clear();
}

/// Integrate every block against its force block
pub fn integrate<const B: usize>(
    particles: &mut [ParticleBlock<B>],
    forces: &mut [ForceBlock<B>],
    time_interval: f32,
) {
    debug_assert_eq!(particles.len(), forces.len());
    for (block, force) in particles.iter_mut().zip(forces.iter_mut()) {
        integrate_block(block, force, time_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbody_core::{Zeroable, zeroed_forces};

    #[test]
    fn test_exact_update_formula() {
        let mut block = ParticleBlock::<1>::zeroed();
        block.set_particle(0, [10.0, 20.0, 30.0], [1.0, -2.0, 0.5], 4.0);
        let mut force = ForceBlock::<1>::zeroed();
        force.fx[0] = 8.0;
        force.fy[0] = -4.0;
        force.fz[0] = 0.0;

        integrate_block(&mut block, &mut force, 2.0);

        // dv = F * 2 / 4 = (4, -2, 0); x += v + dv * 1
        assert_eq!(block.velocity(0), [5.0, -4.0, 0.5]);
        assert_eq!(block.position(0), [15.0, 16.0, 30.5]);
    }

    #[test]
    fn test_forces_cleared() {
        let mut blocks = vec![ParticleBlock::<4>::zeroed(); 3];
        for block in &mut blocks {
            for k in 0..4 {
                block.set_particle(k, [k as f32; 3], [0.0; 3], 1.0 + k as f32);
            }
        }
        let mut forces = zeroed_forces::<4>(3);
        for f in &mut forces {
            f.fx = [1.0, 2.0, 3.0, 4.0];
            f.fz = [-1.0; 4];
        }

        integrate(&mut blocks, &mut forces, 0.5);

        assert!(forces.iter().all(|f| f.is_zero()));
    }

    #[test]
    fn test_zero_dt_keeps_resting_particles() {
        let mut block = ParticleBlock::<2>::zeroed();
        block.set_particle(0, [1.5, 2.5, 3.5], [0.0; 3], 1.0e10);
        block.set_particle(1, [4.0, 5.0, 6.0], [0.0; 3], 2.0e9);
        let before = block;

        let mut force = ForceBlock::<2>::zeroed();
        force.fx = [3.0e3, -1.0e2];
        force.fy = [7.0, 8.0];

        integrate_block(&mut block, &mut force, 0.0);

        assert_eq!(block, before);
        assert!(force.is_zero());
    }

    #[test]
    fn test_weight_untouched() {
        let mut block = ParticleBlock::<2>::zeroed();
        block.set_particle(0, [0.0; 3], [1.0; 3], 3.0);
        block.set_particle(1, [1.0; 3], [0.0; 3], 6.0);
        let weights = block.weight;

        let mut force = ForceBlock::<2>::zeroed();
        force.fx = [1.0, 1.0];
        integrate_block(&mut block, &mut force, 1.0);

        assert_eq!(block.weight, weights);
    }
}
