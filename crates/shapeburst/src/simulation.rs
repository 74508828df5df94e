//! # Simulation — The Frame Loop
//!
//! [`Simulation`] owns everything: the world, the schedule, the lifecycle
//! manager, the viewport and the clock values. A host drives it with three
//! calls and never touches the ECS directly:
//!
//! ```text
//! host                         Simulation
//! ────                         ──────────
//! tick(delta, elapsed) ──────▶ frame()
//!                                1. time.advance
//!                                2. lifecycle.drain_due(elapsed)
//!                                3. schedule.run: movement → render
//! click(x, y) ───────────────▶ pointer_click()   spawn a burst
//! resize(w, h) ──────────────▶ resize()          next frame wraps to it
//! ```
//!
//! Clicks and resizes take `&mut self`, so they can only land between
//! frames. The query engine keeps up on every attach, so a burst spawned
//! by a click is drawn on the very next frame.

use crate::config::SimConfig;
use crate::ecs::{Entity, Frame, QueryId, Schedule, SystemTiming, World};
use crate::error::{ConfigError, FrameError};
use crate::lifecycle::{LifecycleManager, RandSampler, Sampler};
use crate::math::{Vec2, Viewport};
use crate::render::DrawSurface;
use crate::systems::{MovementSystem, RenderSystem};
use crate::time::Time;

/// Point-in-time counters for diagnostics overlays and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct SimStats {
    /// Live entities, visible or not.
    pub entities: usize,
    /// Entities the render system will draw.
    pub visible: usize,
    /// Expiries scheduled but not yet applied.
    pub pending_expiries: usize,
    pub frame_count: u64,
    /// Entities created / destroyed since start.
    pub spawned_total: u64,
    pub destroyed_total: u64,
    /// Stored values per component type, sorted by name.
    pub components: Vec<(&'static str, usize)>,
    /// Per-system timings of the last frame, in run order.
    pub timings: Vec<SystemTiming>,
}

/// The click-to-burst shape simulation.
pub struct Simulation {
    world: World,
    schedule: Schedule,
    lifecycle: LifecycleManager,
    visible: QueryId,
    time: Time,
    viewport: Viewport,
    config: SimConfig,
}

impl Simulation {
    /// Build a simulation with a `rand`-backed sampler, seeded from
    /// `config.seed` when set.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let sampler = RandSampler::from_seed(config.seed);
        Self::with_sampler(config, Box::new(sampler))
    }

    /// Build a simulation drawing its random numbers from `sampler`.
    ///
    /// Fails if `config` doesn't pass [`SimConfig::validate`].
    pub fn with_sampler(config: SimConfig, sampler: Box<dyn Sampler>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = World::new();
        let movement = MovementSystem::new(&mut world, config.half_size());
        let render = RenderSystem::new(&mut world, config.palette, config.stroke_width);
        let visible = render.query();

        let mut schedule = Schedule::new();
        schedule.add_system(movement);
        schedule.add_system(render);

        log::info!(
            "simulation ready: {}x{} viewport, bursts of {}, expire action {:?}",
            config.viewport.width,
            config.viewport.height,
            config.batch_size,
            config.expire_action
        );

        Ok(Self {
            world,
            schedule,
            lifecycle: LifecycleManager::new(&config, sampler),
            visible,
            time: Time::default(),
            viewport: config.viewport,
            config,
        })
    }

    /// Run one frame: apply due expiries, then move and draw.
    ///
    /// `delta` and `elapsed` are milliseconds. On error the frame is
    /// abandoned after the failing system; state from earlier systems stays.
    pub fn frame(&mut self, delta: f32, elapsed: f64, surface: &mut dyn DrawSurface) -> Result<(), FrameError> {
        self.time.advance(delta, elapsed);

        let report = self.lifecycle.drain_due(&mut self.world, elapsed);
        if report.hidden + report.despawned + report.skipped > 0 {
            log::debug!(
                "frame {}: {} hidden, {} despawned, {} skipped",
                self.time.frame_count(),
                report.hidden,
                report.despawned,
                report.skipped
            );
        }

        let mut frame = Frame {
            time: self.time,
            viewport: self.viewport,
            surface,
        };
        self.schedule
            .run(&mut self.world, &mut frame)
            .map_err(|source| {
                log::error!("frame {} aborted: {source}", self.time.frame_count());
                FrameError::Aborted {
                    frame: self.time.frame_count(),
                    source,
                }
            })
    }

    /// Spawn a burst at `(x, y)`, timed from the last frame's `elapsed`.
    pub fn pointer_click(&mut self, x: f32, y: f32) -> Vec<Entity> {
        self.lifecycle
            .spawn_burst(&mut self.world, Vec2::new(x, y), self.time.elapsed())
    }

    /// Change the viewport. Non-positive sizes (a minimised window) are
    /// ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Viewport::new(width, height);
        } else {
            log::warn!("ignoring resize to {width}x{height}");
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct store access, for hosts that add their own entities.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    pub fn stats(&self) -> SimStats {
        let (spawned_total, destroyed_total) = self.world.lifetime_counts();
        SimStats {
            entities: self.world.entity_count(),
            visible: self.world.query_len(self.visible),
            pending_expiries: self.lifecycle.pending(),
            frame_count: self.time.frame_count(),
            spawned_total,
            destroyed_total,
            components: self.world.component_counts(),
            timings: self.schedule.timings().to_vec(),
        }
    }
}
