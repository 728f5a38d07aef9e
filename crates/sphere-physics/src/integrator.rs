//! Fixed-step integrator with circular containment
//!
//! Particles move at constant velocity. When a step carries one past the
//! boundary it is projected back onto the rim and its velocity is reversed
//! and damped, so bouncing particles lose energy and settle.

use crate::boundary::Boundary;
use crate::constants::{DAMPING, PULSE_SPEED, TIME_STEP};
use crate::error::ConfigurationError;
use crate::particle::Particle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorParams {
    pub time_step: f32,
    /// Velocity multiplier on bounce, in `[0, 1]`
    pub damping: f32,
    /// Pulse phase advance per unit time
    pub pulse_speed: f32,
}

impl Default for IntegratorParams {
    fn default() -> Self {
        Self {
            time_step: TIME_STEP,
            damping: DAMPING,
            pulse_speed: PULSE_SPEED,
        }
    }
}

impl IntegratorParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(ConfigurationError::InvalidTimeStep(self.time_step));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(ConfigurationError::InvalidDamping(self.damping));
        }
        // Phase only ever moves forward
        if !self.pulse_speed.is_finite() || self.pulse_speed < 0.0 {
            return Err(ConfigurationError::InvalidPulseSpeed(self.pulse_speed));
        }
        Ok(())
    }
}

/// Advance a single particle by one step. Returns true if it bounced.
pub fn step_particle(particle: &mut Particle, boundary: &Boundary, params: &IntegratorParams) -> bool {
    particle.position += particle.velocity * params.time_step;

    // distance > radius > 0 here, so the division is safe
    let offset = particle.position - boundary.center();
    let distance = offset.length();
    let bounced = distance > boundary.radius();
    if bounced {
        particle.position = boundary.center() + offset / distance * boundary.radius();
        particle.velocity = -particle.velocity * params.damping;
    }

    particle.pulse_phase += params.pulse_speed * params.time_step;
    bounced
}

/// Advance every particle by one step. Returns the number of bounces.
pub fn step(particles: &mut [Particle], boundary: &Boundary, params: &IntegratorParams) -> usize {
    particles
        .iter_mut()
        .map(|p| step_particle(p, boundary, params))
        .filter(|&bounced| bounced)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{seed_particles, SeedRanges};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPSILON: f32 = 1e-3;

    fn boundary() -> Boundary {
        Boundary::new(Vec2::new(100.0, 100.0), 50.0).unwrap()
    }

    #[test]
    fn test_constant_velocity_inside() {
        let b = boundary();
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::new(0.25, -0.125), 3.0, 0.0);
        let bounced = step_particle(&mut p, &b, &IntegratorParams::default());

        assert!(!bounced);
        assert_eq!(p.position, Vec2::new(100.25, 99.875));
        assert_eq!(p.velocity, Vec2::new(0.25, -0.125));
        assert!((p.pulse_phase - PULSE_SPEED).abs() < 1e-7);
    }

    #[test]
    fn test_bounce_clamps_and_damps() {
        let b = boundary();
        let mut p = Particle::new(Vec2::new(149.9, 100.0), Vec2::new(0.5, 0.0), 3.0, 0.0);
        let before = p.speed();
        let bounced = step_particle(&mut p, &b, &IntegratorParams::default());

        assert!(bounced);
        assert!((p.position - Vec2::new(150.0, 100.0)).length() < 1e-4);
        assert_eq!(p.velocity, Vec2::new(-0.4, 0.0));
        assert!((p.speed() - before * 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_energy_dissipation_on_diagonal_bounce() {
        let b = boundary();
        let v = Vec2::new(3.0, 4.0);
        let start = b.center() + Vec2::new(0.6, 0.8) * 49.0;
        let mut p = Particle::new(start, v, 3.0, 0.0);
        assert!(step_particle(&mut p, &b, &IntegratorParams::default()));
        assert!((p.speed() - 5.0 * 0.8).abs() < 1e-5);
        assert!(b.contains(p.position, EPSILON));
    }

    #[test]
    fn test_particle_at_center_is_not_a_violation() {
        let b = boundary();
        let mut p = Particle::new(b.center(), Vec2::ZERO, 3.0, 0.0);
        assert!(!step_particle(&mut p, &b, &IntegratorParams::default()));
        assert_eq!(p.position, b.center());
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_containment_holds_over_many_ticks() {
        let b = boundary();
        let mut rng = StdRng::seed_from_u64(11);
        let ranges = SeedRanges {
            max_speed: 4.0,
            ..Default::default()
        };
        let mut particles = seed_particles(&mut rng, &b, 50, &ranges);
        let params = IntegratorParams::default();

        for _ in 0..5000 {
            step(&mut particles, &b, &params);
            for p in &particles {
                assert!(b.contains(p.position, EPSILON));
            }
        }
    }

    #[test]
    fn test_step_is_deterministic() {
        let b = boundary();
        let initial = seed_particles(&mut StdRng::seed_from_u64(5), &b, 40, &SeedRanges::default());
        let params = IntegratorParams::default();

        let mut a = initial.clone();
        let mut c = initial;
        for _ in 0..1000 {
            step(&mut a, &b, &params);
            step(&mut c, &b, &params);
        }
        assert_eq!(a, c);
    }

    #[test]
    fn test_pulse_phase_never_wraps() {
        let b = boundary();
        let mut p = Particle::new(b.center(), Vec2::ZERO, 3.0, 6.2);
        let params = IntegratorParams::default();
        let mut last = p.pulse_phase;
        for _ in 0..100 {
            step_particle(&mut p, &b, &params);
            assert!(p.pulse_phase > last);
            last = p.pulse_phase;
        }
    }

    #[test]
    fn test_params_validation() {
        assert!(IntegratorParams::default().validate().is_ok());
        let bad = IntegratorParams {
            damping: 1.5,
            ..Default::default()
        };
        assert_eq!(bad.validate(), Err(ConfigurationError::InvalidDamping(1.5)));
        let bad = IntegratorParams {
            time_step: 0.0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
        let bad = IntegratorParams {
            pulse_speed: -0.02,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigurationError::InvalidPulseSpeed(-0.02))
        );
    }
}
