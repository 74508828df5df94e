//! Component schemas.
//!
//! Plain data attached to entities. The world stores each type in its own
//! sparse set; nothing here knows about storage.
//!
//! | Component      | Written by             | Read by                 |
//! |----------------|------------------------|-------------------------|
//! | [`Position`]   | spawn, movement        | movement, render        |
//! | [`Velocity`]   | spawn                  | movement                |
//! | [`Shape`]      | spawn                  | render                  |
//! | [`Renderable`] | spawn, expiry (detach) | render (query filter)   |

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Center of an entity in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Position> for Vec2 {
    fn from(p: Position) -> Self {
        Vec2::new(p.x, p.y)
    }
}

impl From<Vec2> for Position {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// Pixels per millisecond. Assigned at spawn and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Velocity> for Vec2 {
    fn from(v: Velocity) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// What to draw. The size is sampled once at spawn and stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "primitive", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32 },
    Box { side: f32 },
}

impl Shape {
    /// Half the shape's width: radius for a circle, half the side for a box.
    pub fn half_extent(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Box { side } => side * 0.5,
        }
    }
}

/// Marker: the entity should currently be drawn.
///
/// Detached on expiry. An entity without it keeps moving but is invisible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderable;
