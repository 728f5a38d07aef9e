//! Software rasterizer backing the windowed and headless hosts
//!
//! Pixels are stored as straight-alpha sRGB bytes, row-major from the top
//! left. Shapes are sampled at pixel centres with a one pixel soft edge.

use glam::{UVec2, Vec2};

use crate::color::Color;
use crate::surface::{DrawContext, RadialGradient, Surface, SurfaceError};

pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 bytes, `4 * width` per row
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Clipped pixel bounds of a square around `center`
    fn bounds(&self, center: Vec2, extent: f32) -> Option<(u32, u32, u32, u32)> {
        let min = (center - Vec2::splat(extent)).floor().max(Vec2::ZERO);
        let max = (center + Vec2::splat(extent))
            .ceil()
            .min(Vec2::new(self.width as f32, self.height as f32));
        if min.x >= max.x || min.y >= max.y {
            return None;
        }
        Some((min.x as u32, min.y as u32, max.x as u32, max.y as u32))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let index = (y * self.width + x) as usize;
        let dst = self.pixels[index];
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = alpha + dst_a * (1.0 - alpha);
        if out_a <= 0.0 {
            return;
        }

        let channel = |src: f32, dst: u8| {
            let dst = dst as f32 / 255.0;
            let value = (src * alpha + dst * dst_a * (1.0 - alpha)) / out_a;
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        self.pixels[index] = [
            channel(color.r, dst[0]),
            channel(color.g, dst[1]),
            channel(color.b, dst[2]),
            (out_a * 255.0).round() as u8,
        ];
    }
}

impl DrawContext for PixelCanvas {
    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(center, radius + 1.0) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius + 0.5 - p.distance(center)).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        if gradient.radius <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.bounds(gradient.center, gradient.radius) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let distance = p.distance(gradient.center);
                if distance <= gradient.radius {
                    self.blend(x, y, gradient.sample(distance), 1.0);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        let half = width.max(0.0) * 0.5;
        let min = from.min(to) - Vec2::splat(half + 1.0);
        let max = from.max(to) + Vec2::splat(half + 1.0);
        let center = (min + max) * 0.5;
        let extent = ((max - min) * 0.5).max_element();
        let Some((x0, y0, x1, y1)) = self.bounds(center, extent) else {
            return;
        };

        let segment = to - from;
        let length_sq = segment.length_squared();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if length_sq > 0.0 {
                    ((p - from).dot(segment) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let distance = p.distance(from + segment * t);
                let coverage = (half + 0.5 - distance).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage);
            }
        }
    }
}

impl Surface for PixelCanvas {
    type Context = Self;

    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0; 4]; (width as usize) * (height as usize)];
    }

    /// A canvas with no area has nothing to draw on
    fn context(&mut self) -> Result<&mut Self, SurfaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(SurfaceError::Unavailable);
        }
        Ok(self)
    }
}
