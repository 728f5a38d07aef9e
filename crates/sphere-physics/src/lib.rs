//! # Sphere Physics
//!
//! Particles, the circular boundary they live in, the integrator that moves
//! them and the connection graph derived from their positions.

pub mod boundary;
pub mod connections;
pub mod constants;
pub mod error;
pub mod integrator;
pub mod particle;
pub mod seed;

pub use boundary::*;
pub use connections::*;
pub use constants::*;
pub use error::*;
pub use integrator::*;
pub use particle::*;
pub use seed::*;
