//! Circular region the particles are confined to

use glam::Vec2;

use crate::error::ConfigurationError;

/// Immutable circle. Geometry changes are expressed by building a new
/// `Boundary`, never by mutating one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    center: Vec2,
    radius: f32,
}

impl Boundary {
    pub fn new(center: Vec2, radius: f32) -> Result<Self, ConfigurationError> {
        if !center.is_finite() {
            return Err(ConfigurationError::InvalidCenter);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigurationError::DegenerateBoundary { radius });
        }
        Ok(Self { center, radius })
    }

    /// Boundary centred on a `width` x `height` surface.
    ///
    /// `fill` is the fraction of half the shorter side used as radius.
    pub fn from_surface(width: u32, height: u32, fill: f32) -> Result<Self, ConfigurationError> {
        if !fill.is_finite() || fill <= 0.0 || fill > 1.0 {
            return Err(ConfigurationError::InvalidBoundaryFill(fill));
        }
        let center = Vec2::new(width as f32, height as f32) * 0.5;
        let radius = width.min(height) as f32 * 0.5 * fill;
        Self::new(center, radius)
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True if `point` lies within the circle, allowing `epsilon` of slack.
    pub fn contains(&self, point: Vec2, epsilon: f32) -> bool {
        point.distance(self.center) <= self.radius + epsilon
    }

    /// Projects `point` onto the circle if it lies outside.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        let offset = point - self.center;
        let distance = offset.length();
        if distance > self.radius {
            self.center + offset / distance * self.radius
        } else {
            point
        }
    }

    /// Maps a point in the unit disk into this boundary.
    pub fn unit_to_surface(&self, local: Vec2) -> Vec2 {
        self.center + local * self.radius
    }

    /// Maps a point in this boundary into the unit disk.
    pub fn surface_to_unit(&self, point: Vec2) -> Vec2 {
        (point - self.center) / self.radius
    }
}
