//! Frame scheduler
//!
//! Drives the tick cycle (integrate, build connections, render) from
//! callbacks supplied by a [`TickSource`], and owns the start / stop / resize
//! lifecycle:
//!
//! ```text
//! Idle --start--> Running --stop / surface lost--> Stopped
//! ```
//!
//! Every tick callback carries the [`TickId`] it was requested under. A
//! callback is honoured only while the scheduler is armed and the id matches
//! the pending request, so a callback that fires after `stop` is a no-op.

use std::collections::VecDeque;

use sphere_physics::{build_connections_into, Boundary, Edge, IntegratorParams, SeedData};
use sphere_renderer::{render_frame, FrameStats, FrameView, RenderStyle, Surface, SurfaceError};

use crate::error::EngineError;
use crate::params::NetworkParams;
use crate::state::SimulationState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickId(u64);

impl TickId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Source of display-refresh callbacks
pub trait TickSource {
    /// Ask for one callback at the next refresh
    fn request(&mut self) -> TickId;

    /// Withdraw a request that has not fired yet
    fn cancel(&mut self, id: TickId);
}

/// Tick source driven by hand, for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualTicks {
    next_id: u64,
    pending: VecDeque<TickId>,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next request to fire, without removing it
    pub fn peek(&self) -> Option<TickId> {
        self.pending.front().copied()
    }

    /// Remove and return the next request to fire
    pub fn fire(&mut self) -> Option<TickId> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl TickSource for ManualTicks {
    fn request(&mut self) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending.push_back(id);
        id
    }

    fn cancel(&mut self, id: TickId) {
        self.pending.retain(|&pending| pending != id);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerStatus {
    Idle,
    Running,
    /// Terminal
    Stopped,
}

/// Result of one tick callback
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// State advanced and the frame was drawn
    Rendered(FrameStats),
    /// State advanced but the surface was unavailable; retried next tick
    Skipped,
    /// The surface was lost and the scheduler stopped
    Stopped,
    /// Stale or unexpected callback, nothing happened
    Ignored,
}

pub struct FrameScheduler<S: Surface, T: TickSource> {
    status: SchedulerStatus,
    armed: bool,
    pending: Option<TickId>,

    state: SimulationState,
    edges: Vec<Edge>,

    params: NetworkParams,
    integrator: IntegratorParams,
    style: RenderStyle,

    surface: Option<S>,
    ticks: T,
    frames_rendered: u64,
}

impl<S: Surface, T: TickSource> FrameScheduler<S, T> {
    pub fn new(
        params: NetworkParams,
        seed_data: Option<&SeedData>,
        ticks: T,
    ) -> Result<Self, EngineError> {
        let state = SimulationState::from_params(&params, seed_data)?;
        Ok(Self {
            status: SchedulerStatus::Idle,
            armed: false,
            pending: None,
            state,
            edges: Vec::new(),
            integrator: params.integrator(),
            style: params.style(),
            params,
            surface: None,
            ticks,
            frames_rendered: 0,
        })
    }

    /// Take ownership of `surface` and begin ticking.
    ///
    /// The first tick runs immediately. If it cannot draw, the scheduler stops
    /// and the error is returned.
    pub fn start(&mut self, surface: S) -> Result<(), EngineError> {
        if self.status != SchedulerStatus::Idle {
            return Err(EngineError::InvalidState {
                expected: SchedulerStatus::Idle,
                found: self.status,
            });
        }

        let size = surface.size();
        if size.x != self.params.width || size.y != self.params.height {
            let boundary = Boundary::from_surface(size.x, size.y, self.params.boundary_fill)?;
            self.state.rebound(boundary);
            self.params.width = size.x;
            self.params.height = size.y;
        }

        self.surface = Some(surface);
        self.status = SchedulerStatus::Running;
        self.armed = true;

        log::info!(
            "Starting particle network: {} particles, {}x{} surface",
            self.state.particles().len(),
            self.params.width,
            self.params.height
        );

        if let Err(err) = self.run_tick() {
            log::warn!("First frame failed: {}", err);
            self.stop();
            return Err(EngineError::SurfaceUnavailable(err));
        }

        self.pending = Some(self.ticks.request());
        Ok(())
    }

    /// Handle a refresh callback
    pub fn on_tick(&mut self, id: TickId) -> TickOutcome {
        if !self.armed || self.status != SchedulerStatus::Running || self.pending != Some(id) {
            log::debug!("Ignoring tick {:?} (status {:?})", id, self.status);
            return TickOutcome::Ignored;
        }
        self.pending = None;

        let outcome = match self.run_tick() {
            Ok(stats) => TickOutcome::Rendered(stats),
            Err(SurfaceError::Unavailable) => {
                log::debug!("Surface unavailable, skipping frame");
                TickOutcome::Skipped
            }
            Err(SurfaceError::Lost) => {
                log::warn!("Drawing surface lost, stopping");
                self.stop();
                return TickOutcome::Stopped;
            }
        };

        self.pending = Some(self.ticks.request());
        outcome
    }

    /// Stop ticking and release the surface. Safe to call more than once and
    /// from any state.
    pub fn stop(&mut self) {
        if self.status == SchedulerStatus::Stopped {
            return;
        }
        self.armed = false;
        if let Some(id) = self.pending.take() {
            self.ticks.cancel(id);
        }
        self.surface = None;
        self.edges.clear();
        self.status = SchedulerStatus::Stopped;
        log::info!("Particle network stopped after {} frames", self.frames_rendered);
    }

    /// Rebuild the boundary for a new surface size without leaving `Running`.
    ///
    /// Invalid sizes are rejected and leave the state untouched. Ignored once
    /// stopped.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if self.status == SchedulerStatus::Stopped {
            return Ok(());
        }

        let boundary = Boundary::from_surface(width, height, self.params.boundary_fill)?;
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
        self.state.rebound(boundary);
        self.params.width = width;
        self.params.height = height;

        log::info!(
            "Resized to {}x{}, boundary r={:.1}",
            width,
            height,
            boundary.radius()
        );
        Ok(())
    }

    /// Integrate, rebuild connections and draw. Integration and graph
    /// building always complete; only drawing can fail.
    fn run_tick(&mut self) -> Result<FrameStats, SurfaceError> {
        self.state.advance(&self.integrator);
        build_connections_into(
            self.state.particles(),
            self.params.connection_threshold,
            &mut self.edges,
        );

        let surface = self.surface.as_mut().ok_or(SurfaceError::Unavailable)?;
        let frame = FrameView {
            particles: self.state.particles(),
            boundary: self.state.boundary(),
            edges: &self.edges,
        };
        let stats = render_frame(surface, frame, &self.style)?;
        self.frames_rendered += 1;
        Ok(stats)
    }

    pub fn status(&self) -> SchedulerStatus {
        self.status
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn ticks_mut(&mut self) -> &mut T {
        &mut self.ticks
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl<S: Surface> FrameScheduler<S, ManualTicks> {
    /// Fire up to `count` pending ticks. Stops early if the scheduler does.
    pub fn advance(&mut self, count: usize) -> Vec<TickOutcome> {
        let mut outcomes = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(id) = self.ticks.fire() else {
                break;
            };
            outcomes.push(self.on_tick(id));
        }
        outcomes
    }
}
