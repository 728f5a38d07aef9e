//! Neural Sphere
//!
//! Windowed host for the particle-network display. Each redraw callback is
//! one engine tick: the scheduler advances and draws into a software canvas,
//! which is then presented through wgpu.

mod config;
mod headless;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use config::Args;
use sphere_physics::SeedData;
use sphere_renderer::{CanvasPresenter, PixelCanvas};
use sphere_simulation::{FrameScheduler, NetworkParams, TickId, TickOutcome, TickSource};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Redraw requests as engine ticks. At most one request is outstanding
struct WindowTicks {
    window: Arc<Window>,
    next_id: u64,
    pending: Option<TickId>,
}

impl WindowTicks {
    fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            next_id: 0,
            pending: None,
        }
    }

    fn take(&mut self) -> Option<TickId> {
        self.pending.take()
    }
}

impl TickSource for WindowTicks {
    fn request(&mut self) -> TickId {
        let id = TickId::new(self.next_id);
        self.next_id += 1;
        self.pending = Some(id);
        self.window.request_redraw();
        id
    }

    fn cancel(&mut self, id: TickId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

struct Display {
    window: Arc<Window>,
    presenter: CanvasPresenter,
    scheduler: FrameScheduler<PixelCanvas, WindowTicks>,
}

impl Display {
    fn new(
        event_loop: &ActiveEventLoop,
        params: &NetworkParams,
        seed_data: Option<&SeedData>,
    ) -> Result<Self> {
        let title = match params.preset {
            sphere_renderer::Preset::NeuralSphere => "Neural Sphere",
            sphere_renderer::Preset::MarketMood => "Market Mood",
        };
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(winit::dpi::PhysicalSize::new(params.width, params.height));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let size = window.inner_size();
        let presenter = pollster::block_on(CanvasPresenter::new(
            window.clone(),
            size.width,
            size.height,
        ))?;

        let mut params = params.clone();
        params.width = size.width;
        params.height = size.height;

        let mut scheduler =
            FrameScheduler::new(params, seed_data, WindowTicks::new(window.clone()))?;
        scheduler.start(PixelCanvas::new(size.width, size.height))?;

        Ok(Self {
            window,
            presenter,
            scheduler,
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.presenter.resize(size.width, size.height);
        if let Err(e) = self.scheduler.resize(size.width, size.height) {
            log::warn!("Ignoring resize to {}x{}: {}", size.width, size.height, e);
        }
    }

    /// Returns false once the display should close
    fn redraw(&mut self) -> bool {
        let Some(id) = self.scheduler.ticks_mut().take() else {
            return true;
        };

        match self.scheduler.on_tick(id) {
            TickOutcome::Rendered(_) => {
                let Some(canvas) = self.scheduler.surface() else {
                    return true;
                };
                match self.presenter.present(canvas) {
                    Ok(()) => true,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        self.presenter.reconfigure();
                        true
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory");
                        self.scheduler.stop();
                        false
                    }
                    Err(e) => {
                        log::warn!("Present failed: {:?}", e);
                        true
                    }
                }
            }
            TickOutcome::Stopped => false,
            TickOutcome::Skipped | TickOutcome::Ignored => true,
        }
    }
}

struct App {
    params: NetworkParams,
    seed_data: Option<SeedData>,
    display: Option<Display>,
    error: Option<anyhow::Error>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.display.is_some() {
            return;
        }
        match Display::new(event_loop, &self.params, self.seed_data.as_ref()) {
            Ok(display) => self.display = Some(display),
            Err(e) => {
                log::error!("Failed to open display: {:#}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(display) = self.display.as_mut() else {
            return;
        };
        if display.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                display.scheduler.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => display.resize(physical_size),

            WindowEvent::RedrawRequested => {
                if !display.redraw() {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(display) = self.display.as_mut() {
            display.scheduler.stop();
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = config::load_params(&args)?;
    let seed_data = config::load_seed_data(args.seed_data.as_deref())?;

    if args.headless {
        let frames = usize::try_from(args.frames)?;
        return headless::run(params, seed_data, frames, args.output.as_deref());
    }

    log::info!("Starting {:?} display...", params.preset);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App {
        params,
        seed_data,
        display: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
