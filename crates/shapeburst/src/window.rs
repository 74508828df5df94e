//! Window host via winit.
//!
//! Implements [`winit::application::ApplicationHandler`] around a
//! [`Simulation`]. The host is thin glue: it tracks the cursor, turns a
//! left click into [`Simulation::pointer_click`], forwards resizes, ticks a
//! [`FrameClock`] on every redraw, and replays the recorded
//! [`DrawList`](crate::render::DrawList) through the GPU.
//!
//! Coordinates are physical pixels throughout, so the cursor, the surface
//! and the simulation viewport agree without scale-factor conversions.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::error::HostError;
use crate::input::{CursorPosition, Input};
use crate::render::pipeline::ShapeRenderer;
use crate::render::tessellate::tessellate;
use crate::render::{DrawList, GpuContext};
use crate::simulation::Simulation;
use crate::time::FrameClock;

/// Frames between diagnostic log lines.
const STATS_INTERVAL: u64 = 600;

/// Open a window and run `sim` until it is closed.
pub fn run(sim: Simulation, title: &str) -> Result<(), HostError> {
    let event_loop = EventLoop::new()?;
    let mut app = WinitApp::new(sim, title.to_string());
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: ShapeRenderer,
}

/// The application state that winit drives.
struct WinitApp {
    sim: Simulation,
    clock: FrameClock,
    cursor: CursorPosition,
    mouse: Input<MouseButton>,
    draw_list: DrawList,
    graphics: Option<Graphics>,
    title: String,
    /// First fatal error, returned from [`run`] after the loop exits.
    error: Option<HostError>,
}

impl WinitApp {
    fn new(sim: Simulation, title: String) -> Self {
        Self {
            sim,
            clock: FrameClock::new(),
            cursor: CursorPosition::default(),
            mouse: Input::new(),
            draw_list: DrawList::new(),
            graphics: None,
            title,
            error: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics, HostError> {
        let viewport = self.sim.viewport();
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::PhysicalSize::new(viewport.width, viewport.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu = GpuContext::new(window.clone())?;
        let renderer = ShapeRenderer::new(&gpu);

        let size = window.inner_size();
        self.sim.resize(size.width as f32, size.height as f32);
        log::info!("window ready: {}x{}", size.width, size.height);

        Ok(Graphics {
            window,
            gpu,
            renderer,
        })
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (delta, elapsed) = self.clock.tick();
        self.draw_list.reset();
        // The simulation logs aborted frames; skip presenting a partial one.
        let drawn = self.sim.frame(delta, elapsed, &mut self.draw_list).is_ok();

        let time = self.sim.time();
        if time.frame_count() % STATS_INTERVAL == 0 {
            log::debug!("{:.1} fps, {:?}", time.fps(), self.sim.stats());
        }

        let Some(graphics) = &mut self.graphics else {
            return;
        };
        if drawn {
            let mesh = tessellate(self.draw_list.commands());
            match graphics
                .renderer
                .render(&graphics.gpu, &mesh, self.sim.viewport())
            {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    graphics.gpu.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory!");
                    event_loop.exit();
                }
                Err(e) => {
                    log::warn!("Surface error: {:?}", e);
                }
            }
        }
        graphics.window.request_redraw();
    }
}

impl ApplicationHandler for WinitApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => {
                log::error!("{err}");
                self.error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(graphics) = &mut self.graphics {
                    graphics.gpu.resize(size.width, size.height);
                }
                self.sim.resize(size.width as f32, size.height as f32);
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => {
                    if self.mouse.press(button) && button == MouseButton::Left {
                        let spawned = self.sim.pointer_click(self.cursor.x, self.cursor.y);
                        log::debug!("click at ({}, {}): {} spawned", self.cursor.x, self.cursor.y, spawned.len());
                    }
                }
                ElementState::Released => self.mouse.release(button),
            },

            WindowEvent::Focused(false) => self.mouse.release_all(),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor.x = position.x as f32;
                self.cursor.y = position.y as f32;
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
