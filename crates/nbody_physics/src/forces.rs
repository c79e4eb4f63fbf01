use nbody_core::{ForceBlock, ParticleBlock};

/// Add the gravitational pull of every particle in `source` on every
/// particle in `target` into `target_force`.
///
/// Coincident pairs (zero separation, which includes each particle against
/// itself when `source` and `target` are the same block) contribute exactly
/// zero. No pair symmetry is exploited: the opposite pull is computed when
/// the blocks are visited the other way round.
pub fn accumulate<const B: usize>(
    target_force: &mut ForceBlock<B>,
    source: &ParticleBlock<B>,
    target: &ParticleBlock<B>,
) {
    for j in 0..B {
        let pos_x2 = source.position_x[j];
        let pos_y2 = source.position_y[j];
        let pos_z2 = source.position_z[j];
        let weight2 = source.weight[j];

        for i in 0..B {
            let diff_x = pos_x2 - target.position_x[i];
            let diff_y = pos_y2 - target.position_y[i];
            let diff_z = pos_z2 - target.position_z[i];

            let distance_squared = diff_x * diff_x + diff_y * diff_y + diff_z * diff_z;
            let distance = distance_squared.sqrt();

            let force = if distance_squared == 0.0 {
                0.0
            } else {
                target.mass[i] / (distance_squared * distance) * weight2
            };

            target_force.fx[i] += force * diff_x;
            target_force.fy[i] += force * diff_y;
            target_force.fz[i] += force * diff_z;
        }
    }
}

/// Sum the pull of all blocks on block `target` into `force`.
///
/// This is the unit of parallel work in the force phase: the caller hands
/// out one `&mut ForceBlock` per destination block, so no two workers ever
/// write the same force block.
pub fn compute_block_forces<const B: usize>(
    force: &mut ForceBlock<B>,
    target: usize,
    particles: &[ParticleBlock<B>],
) {
    let target_block = &particles[target];
    for source in particles {
        accumulate(force, source, target_block);
    }
}

/// Full O(n²) sweep: every ordered block pair, including each block with itself.
/// `forces` must be zero on entry.
pub fn compute_forces<const B: usize>(particles: &[ParticleBlock<B>], forces: &mut [ForceBlock<B>]) {
    debug_assert_eq!(particles.len(), forces.len());
    for (i, force) in forces.iter_mut().enumerate() {
        compute_block_forces(force, i, particles);
    }
}
