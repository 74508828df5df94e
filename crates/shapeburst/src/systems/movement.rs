//! Velocity integration with toroidal wrap.
//!
//! ```text
//! x += vx * delta          then, per axis:
//! y += vy * delta            x > W + m  →  x = -m
//!                            x < -m     →  x = W + m
//! ```
//!
//! `m` is the wrap margin, half the nominal shape size, so a shape slides
//! fully off one edge before it reappears at the other. The viewport comes
//! from the frame, so a resize applies from the next frame on.

use crate::components::{Position, Velocity};
use crate::ecs::{Frame, QueryId, System, World};
use crate::error::EcsError;
use crate::math::Vec2;

pub struct MovementSystem {
    query: QueryId,
    margin: f32,
}

impl MovementSystem {
    pub fn new(world: &mut World, margin: f32) -> Self {
        Self {
            query: world.register_query::<(Velocity, Position)>(),
            margin,
        }
    }
}

impl System for MovementSystem {
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) -> Result<(), EcsError> {
        let delta = frame.time.delta();
        let viewport = frame.viewport;
        for entity in world.query_by_id(self.query) {
            let velocity = Vec2::from(*world.get::<Velocity>(entity)?);
            let position = world.get_mut::<Position>(entity)?;
            let moved = Vec2::from(*position) + velocity * delta;
            *position = viewport.wrap(moved, self.margin).into();
        }
        Ok(())
    }
}
