//! Particle type for the network simulation

use glam::Vec2;

use crate::constants::{HALO_SCALE, PULSE_AMPLITUDE};

/// A simulated point mass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface space
    pub position: Vec2,
    /// Displacement per tick
    pub velocity: Vec2,
    /// Base drawing radius, constant for the particle's lifetime
    pub radius: f32,
    /// Angle driving the glow oscillation. Only ever increases
    pub pulse_phase: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, pulse_phase: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            pulse_phase,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Glow size multiplier in `[0.7, 1.3]`
    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * PULSE_AMPLITUDE
    }

    /// Radius of the gradient halo drawn behind the core
    pub fn halo_radius(&self) -> f32 {
        self.radius * HALO_SCALE * self.pulse_scale()
    }

    /// Radius of the solid core
    pub fn core_radius(&self) -> f32 {
        self.radius * self.pulse_scale()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_scale_bounds() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 3.0, 0.0);
        assert_eq!(p.pulse_scale(), 1.0);

        p.pulse_phase = std::f32::consts::FRAC_PI_2;
        assert!((p.pulse_scale() - 1.3).abs() < 1e-6);

        p.pulse_phase = 3.0 * std::f32::consts::FRAC_PI_2;
        assert!((p.pulse_scale() - 0.7).abs() < 1e-6);

        for i in 0..1000 {
            p.pulse_phase = i as f32 * 0.37;
            let s = p.pulse_scale();
            assert!((0.7 - 1e-6..=1.3 + 1e-6).contains(&s));
        }
    }

    #[test]
    fn test_halo_is_three_cores() {
        let p = Particle::new(Vec2::ZERO, Vec2::ZERO, 4.0, 1.1);
        assert!((p.halo_radius() - 3.0 * p.core_radius()).abs() < 1e-5);
    }
}
