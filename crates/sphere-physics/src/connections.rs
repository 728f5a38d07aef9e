//! Per-tick connection graph
//!
//! Plain pairwise comparison. The particle count is a small constant fixed at
//! initialization, so O(N²) over a few dozen particles beats maintaining a
//! spatial index.

use crate::particle::Particle;

/// Transient link between two particles closer than the threshold
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Lower particle index
    pub a: usize,
    /// Higher particle index
    pub b: usize,
    pub distance: f32,
    /// `1 - distance / threshold`, fades linearly to zero at the threshold
    pub alpha: f32,
}

/// All pairs `(i, j)`, `i < j`, with distance strictly below `threshold`.
pub fn build_connections(particles: &[Particle], threshold: f32) -> Vec<Edge> {
    let mut edges = Vec::new();
    build_connections_into(particles, threshold, &mut edges);
    edges
}

/// Same as [`build_connections`] but reuses `out`, which is cleared first.
pub fn build_connections_into(particles: &[Particle], threshold: f32, out: &mut Vec<Edge>) {
    out.clear();
    if threshold.is_nan() || threshold <= 0.0 {
        return;
    }

    for (i, p) in particles.iter().enumerate() {
        for (j, q) in particles.iter().enumerate().skip(i + 1) {
            let distance = p.position.distance(q.position);
            if distance < threshold {
                out.push(Edge {
                    a: i,
                    b: j,
                    distance,
                    alpha: (1.0 - distance / threshold).clamp(0.0, 1.0),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn at(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 3.0, 0.0)
    }

    #[test]
    fn test_two_particles_fifty_apart() {
        let edges = build_connections(&[at(0.0, 0.0), at(30.0, 40.0)], 80.0);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].a, 0);
        assert_eq!(edges[0].b, 1);
        assert_eq!(edges[0].distance, 50.0);
        assert_eq!(edges[0].alpha, 0.375);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(build_connections(&[at(0.0, 0.0), at(80.0, 0.0)], 80.0).is_empty());
        assert_eq!(build_connections(&[at(0.0, 0.0), at(79.9, 0.0)], 80.0).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_connections(&[], 80.0).is_empty());
        assert!(build_connections(&[at(0.0, 0.0)], 80.0).is_empty());
    }

    #[test]
    fn test_coincident_particles_full_alpha() {
        let edges = build_connections(&[at(5.0, 5.0), at(5.0, 5.0)], 80.0);
        assert_eq!(edges[0].alpha, 1.0);
    }

    #[test]
    fn test_edge_iff_within_threshold() {
        let particles: Vec<Particle> = (0..25)
            .map(|i| at((i * 37 % 200) as f32, (i * 53 % 170) as f32))
            .collect();
        let threshold = 80.0;
        let edges = build_connections(&particles, threshold);

        for i in 0..particles.len() {
            for j in (i + 1)..particles.len() {
                let close = particles[i].position.distance(particles[j].position) < threshold;
                let found = edges.iter().any(|e| e.a == i && e.b == j);
                assert_eq!(close, found, "pair ({}, {})", i, j);
            }
        }
        for e in &edges {
            assert!(e.a < e.b);
            assert!((0.0..=1.0).contains(&e.alpha));
        }
    }

    #[test]
    fn test_into_clears_previous_edges() {
        let mut out = build_connections(&[at(0.0, 0.0), at(1.0, 0.0)], 80.0);
        build_connections_into(&[at(0.0, 0.0), at(500.0, 0.0)], 80.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_positive_threshold_yields_nothing() {
        assert!(build_connections(&[at(0.0, 0.0), at(0.0, 0.0)], 0.0).is_empty());
        assert!(build_connections(&[at(0.0, 0.0), at(0.0, 0.0)], f32::NAN).is_empty());
    }
}
