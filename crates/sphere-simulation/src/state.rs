//! Authoritative particle set and the boundary it lives in

use rand::rngs::StdRng;
use rand::SeedableRng;
use sphere_physics::{
    seed_from_data, seed_particles, Boundary, ConfigurationError, IntegratorParams, Particle,
    SeedData,
};

use crate::params::NetworkParams;

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    particles: Vec<Particle>,
    boundary: Boundary,
}

impl SimulationState {
    pub fn new(boundary: Boundary, particles: Vec<Particle>) -> Self {
        Self {
            particles,
            boundary,
        }
    }

    /// Build the initial state for `params`.
    ///
    /// Without seed data the particles are synthesized from `params.seed`, so
    /// the same parameters always produce the same opening frame.
    pub fn from_params(
        params: &NetworkParams,
        seed_data: Option<&SeedData>,
    ) -> Result<Self, ConfigurationError> {
        params.validate()?;
        let boundary = params.boundary()?;
        let ranges = params.seed_ranges();
        let mut rng = StdRng::seed_from_u64(params.seed);

        let particles = match seed_data {
            Some(data) => seed_from_data(&mut rng, &boundary, data, params.particle_count, &ranges),
            None => seed_particles(&mut rng, &boundary, params.particle_count(), &ranges),
        };

        log::debug!(
            "Seeded {} particles in boundary r={:.1} at ({:.1}, {:.1})",
            particles.len(),
            boundary.radius(),
            boundary.center().x,
            boundary.center().y
        );

        Ok(Self::new(boundary, particles))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Run one integrator step. Returns the number of bounces.
    pub fn advance(&mut self, params: &IntegratorParams) -> usize {
        sphere_physics::step(&mut self.particles, &self.boundary, params)
    }

    /// Replace the boundary, carrying particles along proportionally.
    ///
    /// Each position keeps its place relative to the old centre and radius and
    /// is clamped into the new circle, so containment holds immediately.
    pub fn rebound(&mut self, boundary: Boundary) {
        let old = self.boundary;
        for particle in &mut self.particles {
            let local = old.surface_to_unit(particle.position);
            particle.position = boundary.clamp(boundary.unit_to_surface(local));
        }
        self.boundary = boundary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use sphere_physics::ParticleSeed;

    #[test]
    fn test_same_params_same_state() {
        let params = NetworkParams::default();
        let a = SimulationState::from_params(&params, None).unwrap();
        let b = SimulationState::from_params(&params, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.particles().len(), params.particle_count());
    }

    #[test]
    fn test_zero_particles() {
        let params = NetworkParams {
            particle_count: Some(0),
            ..Default::default()
        };
        let state = SimulationState::from_params(&params, None).unwrap();
        assert!(state.particles().is_empty());
    }

    #[test]
    fn test_zero_surface_rejected() {
        let params = NetworkParams {
            height: 0,
            ..Default::default()
        };
        assert!(matches!(
            SimulationState::from_params(&params, None),
            Err(ConfigurationError::DegenerateBoundary { .. })
        ));
    }

    #[test]
    fn test_seed_data_sets_count() {
        let data = SeedData {
            particles: vec![
                ParticleSeed {
                    position: Vec2::ZERO,
                    velocity: None,
                    radius: None,
                };
                3
            ],
        };
        let state = SimulationState::from_params(&NetworkParams::default(), Some(&data)).unwrap();
        assert_eq!(state.particles().len(), 3);
        assert_eq!(state.particles()[0].position, state.boundary().center());
    }

    #[test]
    fn test_rebound_scales_positions() {
        let old = Boundary::new(Vec2::new(100.0, 100.0), 50.0).unwrap();
        let mut state = SimulationState::new(
            old,
            vec![
                Particle::new(Vec2::new(125.0, 100.0), Vec2::ONE, 2.0, 0.0),
                Particle::new(Vec2::new(100.0, 150.0), Vec2::ONE, 2.0, 0.0),
            ],
        );

        let new = Boundary::new(Vec2::new(300.0, 200.0), 100.0).unwrap();
        state.rebound(new);

        assert_eq!(state.boundary(), &new);
        assert_eq!(state.particles()[0].position, Vec2::new(350.0, 200.0));
        assert!((state.particles()[1].position - Vec2::new(300.0, 300.0)).length() < 1e-4);
        assert_eq!(state.particles()[0].velocity, Vec2::ONE);
        for p in state.particles() {
            assert!(new.contains(p.position, 1e-3));
        }
    }
}
