//! Surface that records drawing calls instead of rasterizing them

use glam::{UVec2, Vec2};

use crate::color::Color;
use crate::surface::{DrawContext, RadialGradient, Surface, SurfaceError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Gradient(RadialGradient),
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<DrawCommand>,
}

impl CommandLog {
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawContext for CommandLog {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        self.commands.push(DrawCommand::Gradient(*gradient));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }
}

/// Records every command issued through it. Availability can be toggled to
/// exercise the failure paths of callers.
#[derive(Debug)]
pub struct RecordingSurface {
    size: UVec2,
    log: CommandLog,
    failure: Option<SurfaceError>,
    frames: usize,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
            log: CommandLog::default(),
            failure: None,
            frames: 0,
        }
    }

    /// Make every following `context()` call fail with `error`, or succeed
    /// again with `None`
    pub fn set_failure(&mut self, error: Option<SurfaceError>) {
        self.failure = error;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.log.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.log.take()
    }

    /// Number of successful context acquisitions
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for RecordingSurface {
    type Context = CommandLog;

    fn size(&self) -> UVec2 {
        self.size
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = UVec2::new(width, height);
    }

    fn context(&mut self) -> Result<&mut CommandLog, SurfaceError> {
        if let Some(error) = self.failure {
            return Err(error);
        }
        self.frames += 1;
        Ok(&mut self.log)
    }
}
