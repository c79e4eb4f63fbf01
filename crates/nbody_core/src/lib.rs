pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{Dispatch, SimConfig};
pub use constants::*;
pub use error::{NBodyError, Result};
pub use types::*;

pub use bytemuck::Zeroable;
