//! Windowless run: fixed frame count, optional PNG of the last frame

use std::path::Path;

use anyhow::{Context, Result};
use sphere_physics::SeedData;
use sphere_renderer::PixelCanvas;
use sphere_simulation::{FrameScheduler, ManualTicks, NetworkParams, TickOutcome};

pub fn run(
    params: NetworkParams,
    seed_data: Option<SeedData>,
    frames: usize,
    output: Option<&Path>,
) -> Result<()> {
    let canvas = PixelCanvas::new(params.width, params.height);
    let mut scheduler = FrameScheduler::new(params, seed_data.as_ref(), ManualTicks::new())?;
    scheduler.start(canvas)?;

    // `start` already drew the first frame
    let outcomes = scheduler.advance(frames.saturating_sub(1));
    let edges: usize = outcomes
        .iter()
        .map(|outcome| match outcome {
            TickOutcome::Rendered(stats) => stats.edges,
            _ => 0,
        })
        .sum();
    let skipped = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, TickOutcome::Skipped))
        .count();

    log::info!(
        "✓ Rendered {} frames ({} skipped), {:.1} edges per frame",
        scheduler.frames_rendered(),
        skipped,
        edges as f32 / outcomes.len().max(1) as f32
    );

    if let Some(path) = output {
        let canvas = scheduler
            .surface()
            .context("surface released before capture")?;
        image::save_buffer(
            path,
            canvas.as_bytes(),
            canvas.width(),
            canvas.height(),
            image::ColorType::Rgba8,
        )
        .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Saved last frame to {}", path.display());
    }

    scheduler.stop();
    Ok(())
}
