//! Back-to-front frame drawing
//!
//! Order is fixed: clear, ambient glow, edges, then each particle's halo and
//! core. Edges go before particles so the particle glow sits on top of them.

use sphere_physics::{Boundary, Edge, Particle};

use crate::style::RenderStyle;
use crate::surface::{DrawContext, RadialGradient, Surface, SurfaceError};

/// Read-only view of one tick's state
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub particles: &'a [Particle],
    pub boundary: &'a Boundary,
    pub edges: &'a [Edge],
}

/// What a frame drew
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub edges: usize,
    pub particles: usize,
}

/// Draw one frame. Fails only if the surface cannot hand out a context, in
/// which case nothing is drawn.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    frame: FrameView<'_>,
    style: &RenderStyle,
) -> Result<FrameStats, SurfaceError> {
    let ctx = surface.context()?;
    Ok(draw_frame(ctx, frame, style))
}

/// Issue the draw calls for one frame on an acquired context
pub fn draw_frame<C: DrawContext + ?Sized>(
    ctx: &mut C,
    frame: FrameView<'_>,
    style: &RenderStyle,
) -> FrameStats {
    let mut stats = FrameStats::default();

    ctx.clear(style.background);

    ctx.fill_radial_gradient(&RadialGradient {
        center: frame.boundary.center(),
        radius: frame.boundary.radius() * style.glow_extent,
        inner: style.glow.with_alpha(style.glow_opacity),
        outer: style.glow.with_alpha(0.0),
    });

    for edge in frame.edges {
        let (Some(a), Some(b)) = (frame.particles.get(edge.a), frame.particles.get(edge.b)) else {
            continue;
        };
        ctx.stroke_line(
            a.position,
            b.position,
            style.line_width,
            style.edge.with_alpha(edge.alpha),
        );
        stats.edges += 1;
    }

    for particle in frame.particles {
        ctx.fill_radial_gradient(&RadialGradient {
            center: particle.position,
            radius: particle.halo_radius(),
            inner: style.halo.with_alpha(style.halo_opacity),
            outer: style.halo.with_alpha(0.0),
        });
        ctx.fill_circle(particle.position, particle.core_radius(), style.core);
        stats.particles += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};
    use glam::Vec2;
    use sphere_physics::build_connections;

    fn boundary() -> Boundary {
        Boundary::new(Vec2::new(100.0, 100.0), 80.0).unwrap()
    }

    fn particles() -> Vec<Particle> {
        vec![
            Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 2.0, 0.0),
            Particle::new(Vec2::new(130.0, 140.0), Vec2::ZERO, 4.0, std::f32::consts::FRAC_PI_2),
        ]
    }

    #[test]
    fn test_draw_order() {
        let b = boundary();
        let ps = particles();
        let edges = build_connections(&ps, 80.0);
        let style = RenderStyle::default();
        let mut surface = RecordingSurface::new(200, 200);

        let stats = render_frame(
            &mut surface,
            FrameView {
                particles: &ps,
                boundary: &b,
                edges: &edges,
            },
            &style,
        )
        .unwrap();
        assert_eq!(stats, FrameStats { edges: 1, particles: 2 });

        let commands = surface.commands();
        assert_eq!(commands.len(), 1 + 1 + 1 + 2 * 2);
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        match commands[1] {
            DrawCommand::Gradient(g) => {
                assert_eq!(g.center, b.center());
                assert_eq!(g.radius, b.radius() * style.glow_extent);
                assert_eq!(g.inner.a, style.glow_opacity);
            }
            other => panic!("expected ambient glow, got {:?}", other),
        }
        match commands[2] {
            DrawCommand::Line { from, to, color, .. } => {
                assert_eq!(from, ps[0].position);
                assert_eq!(to, ps[1].position);
                assert_eq!(color.a, 0.375);
            }
            other => panic!("expected edge, got {:?}", other),
        }
        assert!(matches!(commands[3], DrawCommand::Gradient(_)));
        assert!(matches!(commands[4], DrawCommand::Circle { .. }));
        assert!(matches!(commands[5], DrawCommand::Gradient(_)));
        assert!(matches!(commands[6], DrawCommand::Circle { .. }));
    }

    #[test]
    fn test_particle_sizes_follow_pulse() {
        let b = boundary();
        let ps = particles();
        let mut surface = RecordingSurface::new(200, 200);
        render_frame(
            &mut surface,
            FrameView {
                particles: &ps,
                boundary: &b,
                edges: &[],
            },
            &RenderStyle::default(),
        )
        .unwrap();

        let commands = surface.commands();
        // phase 0 -> scale 1.0
        assert!(matches!(commands[2], DrawCommand::Gradient(g) if g.radius == 6.0));
        assert!(matches!(commands[3], DrawCommand::Circle { radius, .. } if radius == 2.0));
        // phase pi/2 -> scale 1.3
        assert!(matches!(commands[4], DrawCommand::Gradient(g) if (g.radius - 15.6).abs() < 1e-4));
        assert!(matches!(commands[5], DrawCommand::Circle { radius, .. } if (radius - 5.2).abs() < 1e-4));
    }

    #[test]
    fn test_empty_frame_draws_only_glow() {
        let b = boundary();
        let mut surface = RecordingSurface::new(200, 200);
        let stats = render_frame(
            &mut surface,
            FrameView {
                particles: &[],
                boundary: &b,
                edges: &[],
            },
            &RenderStyle::default(),
        )
        .unwrap();

        assert_eq!(stats, FrameStats::default());
        assert_eq!(surface.commands().len(), 2);
    }

    #[test]
    fn test_unavailable_surface_draws_nothing() {
        let b = boundary();
        let ps = particles();
        let mut surface = RecordingSurface::new(200, 200);
        surface.set_failure(Some(SurfaceError::Unavailable));

        let result = render_frame(
            &mut surface,
            FrameView {
                particles: &ps,
                boundary: &b,
                edges: &[],
            },
            &RenderStyle::default(),
        );
        assert_eq!(result, Err(SurfaceError::Unavailable));
        assert!(surface.commands().is_empty());
    }
}
