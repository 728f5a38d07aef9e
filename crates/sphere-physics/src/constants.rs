//! Default tuning constants for the particle network
//!
//! Values are in surface units (pixels) and ticks. They match the look of the
//! dashboard displays at typical panel sizes and are overridable through
//! `NetworkParams`.

/// Particles in a default neural sphere
pub const NEURAL_SPHERE_PARTICLES: usize = 60;

/// Particles in a default market mood display (smaller panel)
pub const MARKET_MOOD_PARTICLES: usize = 40;

/// Pairs closer than this are connected by an edge
pub const CONNECTION_THRESHOLD: f32 = 80.0;

/// Velocity multiplier applied on every boundary bounce
pub const DAMPING: f32 = 0.8;

/// Pulse phase advance per tick (radians)
pub const PULSE_SPEED: f32 = 0.02;

/// Amplitude of the glow size oscillation, `pulse_scale ∈ [1 - A, 1 + A]`
pub const PULSE_AMPLITUDE: f32 = 0.3;

/// Halo radius relative to the particle's base radius
pub const HALO_SCALE: f32 = 3.0;

/// Integration step, one unit per display refresh
pub const TIME_STEP: f32 = 1.0;

/// Initial velocity components are drawn from `[-MAX_SPEED, MAX_SPEED]`
pub const MAX_SPEED: f32 = 0.25;

/// Base radius range
pub const MIN_RADIUS: f32 = 2.0;
pub const MAX_RADIUS: f32 = 5.0;

/// Boundary radius as a fraction of half the shorter surface side
pub const BOUNDARY_FILL: f32 = 0.8;

/// Seed used when the host supplies no seed data
pub const DEFAULT_SEED: u64 = 0x5EED_CAFE;
