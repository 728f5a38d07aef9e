//! Command line and config file handling

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sphere_physics::SeedData;
use sphere_renderer::Preset;
use sphere_simulation::NetworkParams;

#[derive(Parser, Debug)]
#[command(name = "neural-sphere", about = "Particle network display for the trading dashboard")]
pub struct Args {
    /// JSON file overriding any subset of the tuning parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON seed data: { "particles": [ { "position": [x, y] }, ... ] }
    #[arg(long)]
    pub seed_data: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Market mood score in [-1, 1]
    #[arg(long, allow_hyphen_values = true)]
    pub sentiment: Option<f32>,

    #[arg(long)]
    pub particles: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Render without a window
    #[arg(long)]
    pub headless: bool,

    /// Frames to render in headless mode, including the first
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u64).range(1..))]
    pub frames: u64,

    /// PNG path for the last headless frame
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PresetArg {
    NeuralSphere,
    MarketMood,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::NeuralSphere => Preset::NeuralSphere,
            PresetArg::MarketMood => Preset::MarketMood,
        }
    }
}

/// Defaults, then the config file, then command line flags
pub fn load_params(args: &Args) -> Result<NetworkParams> {
    let mut params = match &args.config {
        Some(path) => read_json::<NetworkParams>(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => NetworkParams::default(),
    };

    if let Some(preset) = args.preset {
        params.preset = preset.into();
    }
    if let Some(sentiment) = args.sentiment {
        params.sentiment = sentiment;
    }
    if let Some(count) = args.particles {
        params.particle_count = Some(count);
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }

    params.validate().context("invalid parameters")?;
    Ok(params)
}

pub fn load_seed_data(path: Option<&Path>) -> Result<Option<SeedData>> {
    path.map(|path| {
        read_json::<SeedData>(path)
            .with_context(|| format!("failed to load seed data {}", path.display()))
    })
    .transpose()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}
