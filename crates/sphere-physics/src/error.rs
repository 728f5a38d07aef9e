//! Construction-time errors.

use std::fmt;

/// Invalid construction parameters. Raised when the engine is built or
/// resized, never while ticking.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The boundary radius is zero, negative or not finite.
    DegenerateBoundary { radius: f32 },
    /// Boundary center is not finite.
    InvalidCenter,
    /// Connection threshold must be positive and finite.
    InvalidThreshold(f32),
    /// Damping must lie in `[0, 1]`.
    InvalidDamping(f32),
    /// Pulse speed must be finite.
    InvalidPulseSpeed(f32),
    /// Time step must be positive and finite.
    InvalidTimeStep(f32),
    /// Maximum initial speed must be non-negative and finite.
    InvalidSpeedRange(f32),
    /// Radius range must satisfy `0 < min <= max`.
    InvalidRadiusRange { min: f32, max: f32 },
    /// Boundary fill must lie in `(0, 1]`.
    InvalidBoundaryFill(f32),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::DegenerateBoundary { radius } => {
                write!(f, "Boundary radius must be positive, got {}", radius)
            }
            ConfigurationError::InvalidCenter => write!(f, "Boundary center is not finite"),
            ConfigurationError::InvalidThreshold(t) => {
                write!(f, "Connection threshold must be positive, got {}", t)
            }
            ConfigurationError::InvalidDamping(d) => {
                write!(f, "Damping factor must be within [0, 1], got {}", d)
            }
            ConfigurationError::InvalidPulseSpeed(s) => {
                write!(f, "Pulse speed must be finite, got {}", s)
            }
            ConfigurationError::InvalidTimeStep(dt) => {
                write!(f, "Time step must be positive, got {}", dt)
            }
            ConfigurationError::InvalidSpeedRange(s) => {
                write!(f, "Maximum initial speed must be non-negative, got {}", s)
            }
            ConfigurationError::InvalidRadiusRange { min, max } => {
                write!(f, "Particle radius range [{}, {}] is invalid", min, max)
            }
            ConfigurationError::InvalidBoundaryFill(fill) => {
                write!(f, "Boundary fill must be within (0, 1], got {}", fill)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
