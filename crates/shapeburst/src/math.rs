//! Math types and glam re-exports.
//!
//! We re-export [glam](https://docs.rs/glam) types so users don't need to
//! depend on it directly. The [`Viewport`] type describes the drawable area
//! in pixels, with the origin at the top-left corner and `y` pointing down.

pub use glam::Vec2;

use serde::{Deserialize, Serialize};

/// Drawable area in pixels.
///
/// Owned by the simulation and handed to systems through each
/// [`Frame`](crate::ecs::Frame), so a resize takes effect on the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Wrap one coordinate around `[-margin, extent + margin]`.
    ///
    /// A value past one edge jumps to the opposite edge, margin included, so
    /// a shape fully leaves the screen before it re-enters on the other side.
    /// Values inside the band are returned unchanged.
    pub fn wrap_axis(value: f32, extent: f32, margin: f32) -> f32 {
        if value > extent + margin {
            -margin
        } else if value < -margin {
            extent + margin
        } else {
            value
        }
    }

    /// Apply [`wrap_axis`](Self::wrap_axis) to both axes independently.
    pub fn wrap(&self, point: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            Self::wrap_axis(point.x, self.width, margin),
            Self::wrap_axis(point.y, self.height, margin),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_past_each_edge() {
        let vp = Viewport::new(800.0, 600.0);
        let m = 10.0;
        assert_eq!(vp.wrap(Vec2::new(811.0, 300.0), m), Vec2::new(-10.0, 300.0));
        assert_eq!(vp.wrap(Vec2::new(-11.0, 300.0), m), Vec2::new(810.0, 300.0));
        assert_eq!(vp.wrap(Vec2::new(400.0, 611.0), m), Vec2::new(400.0, -10.0));
        assert_eq!(vp.wrap(Vec2::new(400.0, -11.0), m), Vec2::new(400.0, 610.0));
    }

    #[test]
    fn boundary_values_stay() {
        assert_eq!(Viewport::wrap_axis(810.0, 800.0, 10.0), 810.0);
        assert_eq!(Viewport::wrap_axis(-10.0, 800.0, 10.0), -10.0);
    }

    #[test]
    fn corner_wraps_both_axes() {
        let vp = Viewport::new(100.0, 50.0);
        assert_eq!(vp.wrap(Vec2::new(120.0, -20.0), 5.0), Vec2::new(-5.0, 55.0));
    }
}
