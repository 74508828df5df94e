//! Per-frame systems.
//!
//! Both systems register their query when constructed and keep the
//! [`QueryId`](crate::ecs::QueryId), so a frame never rescans the world.
//! Add them to the schedule movement first: rendering reads the positions
//! movement just wrote.

pub mod movement;
pub mod render;

pub use movement::MovementSystem;
pub use render::RenderSystem;
