//! Tuning parameters for one engine instance

use serde::{Deserialize, Serialize};
use sphere_physics::{
    Boundary, ConfigurationError, IntegratorParams, SeedRanges, BOUNDARY_FILL,
    CONNECTION_THRESHOLD, DAMPING, DEFAULT_SEED, MAX_RADIUS, MAX_SPEED, MIN_RADIUS, PULSE_SPEED,
    TIME_STEP,
};
use sphere_renderer::{Preset, RenderStyle};

/// Every field has a default, so a config file may name only what it changes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Initial surface size. The surface passed to `start` wins if it differs
    pub width: u32,
    pub height: u32,

    /// `None` uses the preset's count, or the seed data's length when seed
    /// data is given
    pub particle_count: Option<usize>,
    pub connection_threshold: f32,
    pub damping: f32,
    pub pulse_speed: f32,
    pub time_step: f32,

    pub max_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub boundary_fill: f32,

    /// Seed for synthesized particles
    pub seed: u64,

    pub preset: Preset,
    /// Market mood score in `[-1, 1]`, ignored by the neural sphere
    pub sentiment: f32,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            particle_count: None,
            connection_threshold: CONNECTION_THRESHOLD,
            damping: DAMPING,
            pulse_speed: PULSE_SPEED,
            time_step: TIME_STEP,
            max_speed: MAX_SPEED,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            boundary_fill: BOUNDARY_FILL,
            seed: DEFAULT_SEED,
            preset: Preset::default(),
            sentiment: 0.0,
        }
    }
}

impl NetworkParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.connection_threshold.is_finite() || self.connection_threshold <= 0.0 {
            return Err(ConfigurationError::InvalidThreshold(self.connection_threshold));
        }
        self.integrator().validate()?;
        self.seed_ranges().validate()?;
        self.boundary()?;
        Ok(())
    }

    pub fn integrator(&self) -> IntegratorParams {
        IntegratorParams {
            time_step: self.time_step,
            damping: self.damping,
            pulse_speed: self.pulse_speed,
        }
    }

    pub fn seed_ranges(&self) -> SeedRanges {
        SeedRanges {
            max_speed: self.max_speed,
            min_radius: self.min_radius,
            max_radius: self.max_radius,
        }
    }

    pub fn boundary(&self) -> Result<Boundary, ConfigurationError> {
        Boundary::from_surface(self.width, self.height, self.boundary_fill)
    }

    pub fn style(&self) -> RenderStyle {
        RenderStyle::for_preset(self.preset, self.sentiment)
    }

    /// Particle count when no seed data is given
    pub fn particle_count(&self) -> usize {
        self.particle_count
            .unwrap_or_else(|| self.preset.default_particle_count())
    }
}
