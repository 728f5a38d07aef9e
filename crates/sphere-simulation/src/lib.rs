//! # Sphere Simulation
//!
//! Owns the simulation state of one particle-network display and the frame
//! scheduler that advances and draws it.

pub mod error;
pub mod params;
pub mod scheduler;
pub mod state;

pub use error::*;
pub use params::*;
pub use scheduler::*;
pub use state::*;
