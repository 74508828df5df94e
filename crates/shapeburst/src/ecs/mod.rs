//! # Sparse-Set ECS
//!
//! A small Entity Component System: entities are generational ids, each
//! component type lives in its own sparse set, and queries are registered
//! once and kept up to date as components come and go.
//!
//! ## Module Overview
//!
//! - [`entity`]: Generational entity IDs plus creation order
//! - [`component`]: Type-erased sparse storage (`Box<dyn Any>`)
//! - [`world`]: Central container (entities + components + queries)
//! - [`query`]: Incrementally maintained result sets
//! - [`system`]: System trait and ordered, fail-fast schedule

pub(crate) mod component;
pub mod entity;
pub mod query;
pub mod system;
pub mod world;

pub use entity::Entity;
pub use query::{ComponentSet, QueryId};
pub use system::{Frame, Schedule, System, SystemTiming};
pub use world::{SpawnBundle, World};
