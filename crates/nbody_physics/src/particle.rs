use nbody_core::{ParticleBlock, SimConfig, Zeroable};
use rand::Rng;

/// Generate the initial particle distribution: positions uniform in the
/// domain box, masses uniform in [0, mass_maximum), everything at rest.
pub fn generate_blocks<const B: usize>(
    config: &SimConfig,
    n_blocks: usize,
    rng: &mut impl Rng,
) -> Vec<ParticleBlock<B>> {
    let mut blocks = vec![ParticleBlock::<B>::zeroed(); n_blocks];
    for block in blocks.iter_mut() {
        init_block(config, block, rng);
    }
    blocks
}

fn init_block<const B: usize>(config: &SimConfig, block: &mut ParticleBlock<B>, rng: &mut impl Rng) {
    let [size_x, size_y, size_z] = config.domain_size;
    for k in 0..B {
        let pos = [
            rng.gen_range(0.0..size_x),
            rng.gen_range(0.0..size_y),
            rng.gen_range(0.0..size_z),
        ];
        let mass = rng.gen_range(0.0..config.mass_maximum);

        block.set_particle(k, pos, [0.0; 3], mass);
    }
}
