//! # Shapeburst — Click-to-Burst Shape Simulation
//!
//! Click anywhere and a burst of small circles and boxes flies out from the
//! cursor, drifting with random velocities, wrapping around the window
//! edges, and vanishing after a random lifetime.
//!
//! Under the hood it's a small ECS: a generational entity store with sparse
//! per-type component storage, incrementally maintained queries, and an
//! ordered fail-fast schedule running a movement system and a render
//! system. Expiries sit in a min-heap drained at the start of every frame.
//!
//! The core never touches a window. A host drives a [`Simulation`] with
//! frame ticks and clicks, and passes a [`DrawSurface`](render::DrawSurface)
//! to draw on. The `window` feature provides a winit + wgpu host.
//!
//! Start with `use shapeburst::prelude::*` and build a [`Simulation`].

pub mod components;
pub mod config;
pub mod ecs;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod math;
pub mod prelude;
pub mod render;
pub mod simulation;
pub mod systems;
pub mod time;

#[cfg(feature = "window")]
pub mod window;

pub use simulation::{SimStats, Simulation};
