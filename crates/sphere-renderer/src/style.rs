//! Colors and stroke settings for the two dashboard displays

use catppuccin::PALETTE;
use serde::{Deserialize, Serialize};
use sphere_physics::{MARKET_MOOD_PARTICLES, NEURAL_SPHERE_PARTICLES};

use crate::color::Color;

/// Which dashboard display the engine is drawing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    #[default]
    NeuralSphere,
    MarketMood,
}

impl Preset {
    pub fn default_particle_count(self) -> usize {
        match self {
            Preset::NeuralSphere => NEURAL_SPHERE_PARTICLES,
            Preset::MarketMood => MARKET_MOOD_PARTICLES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Color the visible region is cleared to
    pub background: Color,
    /// Ambient glow at the boundary centre
    pub glow: Color,
    /// Opacity at the centre of the ambient glow
    pub glow_opacity: f32,
    /// Glow radius relative to the boundary radius
    pub glow_extent: f32,
    /// Edge stroke color. Alpha is taken from each edge
    pub edge: Color,
    pub line_width: f32,
    /// Inner color of the particle halo
    pub halo: Color,
    /// Halo opacity at the particle centre
    pub halo_opacity: f32,
    pub core: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::neural_sphere()
    }
}

impl RenderStyle {
    pub fn neural_sphere() -> Self {
        let mocha = &PALETTE.mocha.colors;
        Self {
            background: Color::from_catppuccin(&mocha.crust),
            glow: Color::from_catppuccin(&mocha.mauve),
            glow_opacity: 0.12,
            glow_extent: 1.0,
            edge: Color::from_catppuccin(&mocha.sapphire),
            line_width: 1.0,
            halo: Color::from_catppuccin(&mocha.blue),
            halo_opacity: 0.35,
            core: Color::from_catppuccin(&mocha.lavender),
        }
    }

    /// Market mood tint. `sentiment` runs from -1 (bearish, red) through
    /// 0 (neutral, yellow) to 1 (bullish, green) and is clamped.
    pub fn market_mood(sentiment: f32) -> Self {
        let mocha = &PALETTE.mocha.colors;
        let bearish = Color::from_catppuccin(&mocha.red);
        let neutral = Color::from_catppuccin(&mocha.yellow);
        let bullish = Color::from_catppuccin(&mocha.green);

        let sentiment = if sentiment.is_finite() {
            sentiment.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let mood = if sentiment < 0.0 {
            neutral.lerp(bearish, -sentiment)
        } else {
            neutral.lerp(bullish, sentiment)
        };

        Self {
            background: Color::from_catppuccin(&mocha.crust),
            glow: mood,
            glow_opacity: 0.1,
            glow_extent: 1.1,
            edge: mood.lerp(Color::from_catppuccin(&mocha.text), 0.3),
            line_width: 1.0,
            halo: mood,
            halo_opacity: 0.4,
            core: mood.lerp(Color::rgb(1.0, 1.0, 1.0), 0.25),
        }
    }

    pub fn for_preset(preset: Preset, sentiment: f32) -> Self {
        match preset {
            Preset::NeuralSphere => Self::neural_sphere(),
            Preset::MarketMood => Self::market_mood(sentiment),
        }
    }
}
