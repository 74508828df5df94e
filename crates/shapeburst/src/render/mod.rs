//! # Render — Drawing Surface Abstraction
//!
//! The simulation never talks to a GPU or a canvas directly. The render
//! system draws through the [`DrawSurface`] trait, which has exactly the
//! three operations a frame needs:
//!
//! ```text
//! clear(color, viewport)                         ← once, first
//! fill_stroke_circle(center, radius, fill, stroke, width)
//! fill_stroke_rect(top_left, size, fill, stroke, width)
//! ```
//!
//! Coordinates are in pixels with the origin at the top-left corner and `y`
//! pointing down. Strokes are centred on the outline, so half the stroke
//! width lies outside the shape.
//!
//! ## Implementations
//!
//! - [`DrawList`] records every call as a [`DrawCommand`]. Tests assert on
//!   the recording, the headless demo prints it, and the window host
//!   replays it through the GPU.
//! - The window host (feature `window`) tessellates a recorded list into
//!   triangles and uploads them in one buffer. See [`tessellate`].

#[cfg(feature = "window")]
pub mod gpu;
#[cfg(feature = "window")]
pub(crate) mod pipeline;
pub mod tessellate;

#[cfg(feature = "window")]
pub use gpu::GpuContext;

use serde::{Deserialize, Serialize};

use crate::math::{Vec2, Viewport};

// ── Color ────────────────────────────────────────────────────────────────

/// Linear RGBA color, each channel in `[0, 1]`.
///
/// Serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Opaque color from a `0xRRGGBB` literal, e.g. `Color::hex(0xf28d89)`.
    pub fn hex(rgb: u32) -> Self {
        let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

// ── Drawing ──────────────────────────────────────────────────────────────

/// A 2D drawing sink.
pub trait DrawSurface {
    /// Overwrite the whole viewport with `color`.
    fn clear(&mut self, color: Color, viewport: Viewport);

    /// Fill a circle, then stroke its outline.
    fn fill_stroke_circle(&mut self, center: Vec2, radius: f32, fill: Color, stroke: Color, stroke_width: f32);

    /// Fill an axis-aligned rectangle, then stroke its outline.
    fn fill_stroke_rect(&mut self, top_left: Vec2, size: Vec2, fill: Color, stroke: Color, stroke_width: f32);
}

/// One recorded [`DrawSurface`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Color,
        viewport: Viewport,
    },
    Circle {
        center: Vec2,
        radius: f32,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    },
    Rect {
        top_left: Vec2,
        size: Vec2,
        fill: Color,
        stroke: Color,
        stroke_width: f32,
    },
}

/// A [`DrawSurface`] that records calls in order.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded since the last [`reset`](Self::reset).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget all recorded commands, keeping the allocation.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of recorded clears.
    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Recorded shapes (everything except clears), in draw order.
    pub fn shapes(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| !matches!(c, DrawCommand::Clear { .. }))
    }
}

impl DrawSurface for DrawList {
    fn clear(&mut self, color: Color, viewport: Viewport) {
        self.commands.push(DrawCommand::Clear { color, viewport });
    }

    fn fill_stroke_circle(&mut self, center: Vec2, radius: f32, fill: Color, stroke: Color, stroke_width: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
            stroke,
            stroke_width,
        });
    }

    fn fill_stroke_rect(&mut self, top_left: Vec2, size: Vec2, fill: Color, stroke: Color, stroke_width: f32) {
        self.commands.push(DrawCommand::Rect {
            top_left,
            size,
            fill,
            stroke,
            stroke_width,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_channels() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn color_serializes_as_array() {
        let json = serde_json::to_string(&Color::rgba(0.0, 0.5, 1.0, 1.0)).unwrap();
        assert_eq!(json, "[0.0,0.5,1.0,1.0]");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgba(0.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn draw_list_records_in_order() {
        let mut list = DrawList::new();
        list.clear(Color::WHITE, Viewport::new(10.0, 10.0));
        list.fill_stroke_rect(Vec2::ZERO, Vec2::ONE, Color::BLACK, Color::BLACK, 1.0);
        list.fill_stroke_circle(Vec2::ONE, 2.0, Color::WHITE, Color::BLACK, 1.0);

        assert_eq!(list.len(), 3);
        assert_eq!(list.clear_count(), 1);
        let shapes: Vec<_> = list.shapes().collect();
        assert!(matches!(shapes[0], DrawCommand::Rect { .. }));
        assert!(matches!(shapes[1], DrawCommand::Circle { radius, .. } if *radius == 2.0));

        list.reset();
        assert!(list.is_empty());
    }
}
