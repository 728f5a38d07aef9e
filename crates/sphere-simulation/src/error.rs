//! Engine-level errors.

use std::fmt;

use sphere_physics::ConfigurationError;
use sphere_renderer::SurfaceError;

use crate::scheduler::SchedulerStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Invalid construction or resize parameters.
    Configuration(ConfigurationError),
    /// The first frame could not obtain a drawing context.
    SurfaceUnavailable(SurfaceError),
    /// Lifecycle call made in the wrong state.
    InvalidState {
        expected: SchedulerStatus,
        found: SchedulerStatus,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Configuration(e) => write!(f, "Invalid configuration: {}", e),
            EngineError::SurfaceUnavailable(e) => write!(f, "Could not start: {}", e),
            EngineError::InvalidState { expected, found } => {
                write!(f, "Scheduler is {:?}, expected {:?}", found, expected)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Configuration(e) => Some(e),
            EngineError::SurfaceUnavailable(e) => Some(e),
            EngineError::InvalidState { .. } => None,
        }
    }
}

impl From<ConfigurationError> for EngineError {
    fn from(e: ConfigurationError) -> Self {
        EngineError::Configuration(e)
    }
}
