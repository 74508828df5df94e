//! Error types.
//!
//! Store operations return [`EcsError`]. A system that hits one aborts the
//! frame, and the [`Schedule`](crate::ecs::Schedule) wraps it in a
//! [`ScheduleError`] naming the system. [`FrameError`] is what the host sees.

use crate::ecs::Entity;

/// Errors raised by [`World`](crate::ecs::World) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EcsError {
    /// The entity was never created or has been destroyed.
    #[error("unknown entity {0:?}")]
    UnknownEntity(Entity),

    /// `attach` on an entity that already owns a component of this type.
    #[error("entity {entity:?} already has a `{component}` component")]
    DuplicateComponent {
        entity: Entity,
        component: &'static str,
    },

    /// `detach` / `get` on an entity that doesn't own a component of this type.
    #[error("entity {entity:?} has no `{component}` component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },
}

/// A system failed while the schedule was running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("system `{system}` failed: {source}")]
    System {
        system: String,
        #[source]
        source: EcsError,
    },
}

/// A frame was aborted. Nothing after the failing system ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    #[error("frame {frame} aborted: {source}")]
    Aborted {
        frame: u64,
        #[source]
        source: ScheduleError,
    },
}

/// Errors from loading or validating a [`SimConfig`](crate::config::SimConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors from bringing up the window host.
#[cfg(feature = "window")]
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface is not supported by the adapter (no {0})")]
    UnsupportedSurface(&'static str),
}
