// Physical constants and benchmark defaults (SI units):
// - Distance: metres
// - Mass: kilograms
// - Time: seconds

/// Gravitational constant, N·m²/kg²
pub const G: f32 = 6.6726e-11;

/// Particles per block. Every block in a run has exactly this many lanes.
pub const BLOCK_SIZE: usize = 2048;

/// Default edge lengths of the box particles are scattered in (m)
pub const DEFAULT_DOMAIN_SIZE: [f32; 3] = [1.0e6, 1.0e6, 1.0e6];

/// Default upper bound for particle mass (kg)
pub const DEFAULT_MASS_MAXIMUM: f32 = 1.0e10;

/// Default timestep (s)
pub const DEFAULT_TIME_INTERVAL: f32 = 1.0;

pub const DEFAULT_SEED: u64 = 12345;

pub const DEFAULT_NAME: &str = "particles";

/// Verification fails when more than this percentage of particles mismatch
pub const MISMATCH_PERCENT_LIMIT: f64 = 0.6;

/// Verification fails when the mean relative error (in percent) exceeds this
pub const RELATIVE_ERROR_LIMIT: f64 = 0.000008;
