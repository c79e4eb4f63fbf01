use bytemuck::{Pod, Zeroable};

use crate::constants::{BLOCK_SIZE, G};

/// One tile of particles in structure-of-arrays layout.
///
/// Lanes are index-aligned: particle `k` is made of `position_*[k]`,
/// `velocity_*[k]`, `mass[k]` and `weight[k]`. `weight` caches `G * mass`
/// and is only written by [`ParticleBlock::set_particle`].
///
/// The struct is `repr(C)` plain old data, so a slice of blocks can be cast
/// straight to bytes for storage.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleBlock<const B: usize = BLOCK_SIZE> {
    /// m
    pub position_x: [f32; B],
    pub position_y: [f32; B],
    pub position_z: [f32; B],
    /// m/s
    pub velocity_x: [f32; B],
    pub velocity_y: [f32; B],
    pub velocity_z: [f32; B],
    /// kg
    pub mass: [f32; B],
    pub weight: [f32; B],
}

// SAFETY: repr(C) struct made only of f32 arrays, so it has no padding and
// every bit pattern is a valid value.
unsafe impl<const B: usize> Zeroable for ParticleBlock<B> {}
unsafe impl<const B: usize> Pod for ParticleBlock<B> {}

impl<const B: usize> ParticleBlock<B> {
    /// Write particle `k`, deriving its weight from the mass
    pub fn set_particle(&mut self, k: usize, position: [f32; 3], velocity: [f32; 3], mass: f32) {
        self.position_x[k] = position[0];
        self.position_y[k] = position[1];
        self.position_z[k] = position[2];
        self.velocity_x[k] = velocity[0];
        self.velocity_y[k] = velocity[1];
        self.velocity_z[k] = velocity[2];
        self.mass[k] = mass;
        self.weight[k] = G * mass;
    }

    pub fn position(&self, k: usize) -> [f32; 3] {
        [self.position_x[k], self.position_y[k], self.position_z[k]]
    }

    pub fn velocity(&self, k: usize) -> [f32; 3] {
        [self.velocity_x[k], self.velocity_y[k], self.velocity_z[k]]
    }

    /// Total momentum carried by this block
    pub fn momentum(&self) -> [f64; 3] {
        let mut p = [0.0f64; 3];
        for k in 0..B {
            let m = self.mass[k] as f64;
            p[0] += m * self.velocity_x[k] as f64;
            p[1] += m * self.velocity_y[k] as f64;
            p[2] += m * self.velocity_z[k] as f64;
        }
        p
    }
}

/// Accumulated force on each particle of the matching [`ParticleBlock`].
///
/// Holds a non-zero value only between the force phase and the integration
/// phase of a timestep.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBlock<const B: usize = BLOCK_SIZE> {
    /// N
    pub fx: [f32; B],
    pub fy: [f32; B],
    pub fz: [f32; B],
}

// SAFETY: same reasoning as ParticleBlock.
unsafe impl<const B: usize> Zeroable for ForceBlock<B> {}
unsafe impl<const B: usize> Pod for ForceBlock<B> {}

impl<const B: usize> ForceBlock<B> {
    pub fn force(&self, k: usize) -> [f32; 3] {
        [self.fx[k], self.fy[k], self.fz[k]]
    }

    pub fn clear(&mut self) {
        *self = Self::zeroed();
    }

    pub fn is_zero(&self) -> bool {
        self.fx.iter().chain(&self.fy).chain(&self.fz).all(|&f| f == 0.0)
    }
}

/// Allocate `n_blocks` zeroed force blocks
pub fn zeroed_forces<const B: usize>(n_blocks: usize) -> Vec<ForceBlock<B>> {
    vec![ForceBlock::zeroed(); n_blocks]
}
