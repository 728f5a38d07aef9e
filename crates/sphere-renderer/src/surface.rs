//! Drawing surface abstraction
//!
//! The render pipeline only speaks these primitives. A host maps them onto
//! whatever 2D surface it has: the software [`PixelCanvas`](crate::PixelCanvas),
//! the [`RecordingSurface`](crate::RecordingSurface) used in tests, or its own.

use std::fmt;

use glam::{UVec2, Vec2};

use crate::color::Color;

/// Circle filled with a color that fades from `inner` at the centre to
/// `outer` at `radius`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub inner: Color,
    pub outer: Color,
}

impl RadialGradient {
    /// Color at `distance` from the centre
    pub fn sample(&self, distance: f32) -> Color {
        if self.radius <= 0.0 {
            return self.outer;
        }
        self.inner.lerp(self.outer, distance / self.radius)
    }
}

/// Primitive drawing calls issued by the render pipeline
pub trait DrawContext {
    /// Clear the whole visible region
    fn clear(&mut self, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// A drawing surface owned by one engine instance
pub trait Surface {
    type Context: DrawContext;

    /// Size in surface units
    fn size(&self) -> UVec2;

    fn resize(&mut self, width: u32, height: u32);

    /// Acquire the drawing context for this frame
    fn context(&mut self) -> Result<&mut Self::Context, SurfaceError>;
}

/// Failure to obtain a drawing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    /// Temporarily unavailable. The frame is skipped and retried next tick
    Unavailable,
    /// Gone for good. The scheduler stops
    Lost,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Unavailable => write!(f, "Drawing surface is unavailable"),
            SurfaceError::Lost => write!(f, "Drawing surface was lost"),
        }
    }
}

impl std::error::Error for SurfaceError {}
