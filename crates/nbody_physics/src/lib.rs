pub mod forces;
pub mod integrator;
pub mod particle;
pub mod verification;

pub use forces::{accumulate, compute_block_forces, compute_forces};
pub use integrator::{integrate, integrate_block};
pub use verification::{ComparisonStats, Verification, verify};
