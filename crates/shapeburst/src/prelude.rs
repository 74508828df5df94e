//! Convenience re-exports. `use shapeburst::prelude::*` brings in
//! everything a host or a test usually needs.

pub use crate::components::{Position, Renderable, Shape, Velocity};
pub use crate::config::{ExpireAction, Palette, SimConfig};
pub use crate::ecs::{Entity, Frame, QueryId, Schedule, System, World};
pub use crate::error::{ConfigError, EcsError, FrameError, ScheduleError};
pub use crate::input::{CursorPosition, Input};
pub use crate::lifecycle::{LifecycleManager, RandSampler, Sampler, ScriptedSampler};
pub use crate::math::{Vec2, Viewport};
pub use crate::render::{Color, DrawCommand, DrawList, DrawSurface};
pub use crate::simulation::{SimStats, Simulation};
pub use crate::time::{FrameClock, Time};

#[cfg(feature = "window")]
pub use crate::error::HostError;
