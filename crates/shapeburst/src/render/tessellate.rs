//! # Tessellate — Draw Commands to Triangles
//!
//! The GPU only draws triangles, so a recorded [`DrawList`](super::DrawList)
//! is turned into one indexed mesh per frame before upload:
//!
//! ```text
//! Circle  → fill: center + rim vertices, fan triangulation
//!           stroke: ring of quads between r - w/2 and r + w/2
//! Rect    → fill: 4 vertices, 2 triangles
//!           stroke: ring of quads around the outline, inset/outset by w/2
//! Clear   → discards everything tessellated so far, sets the clear color
//! ```
//!
//! Vertices stay in pixel space. The shader maps pixels to clip space with
//! the viewport size, so nothing here depends on the window.
//!
//! Draw order is preserved by emitting indices in command order: with no
//! depth buffer, a later triangle paints over an earlier one, and a shape's
//! stroke paints over its own fill.

use super::{Color, DrawCommand};
use crate::math::Vec2;

/// Rim vertices per circle.
pub const CIRCLE_SEGMENTS: u32 = 32;

/// One vertex: pixel position plus color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "window", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Triangles for one frame.
#[derive(Debug, Default, Clone)]
pub struct Mesh {
    /// Background from the last `Clear` command, if any.
    pub clear: Option<Color>,
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec2, color: Color) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(ShapeVertex {
            position: position.to_array(),
            color: color.to_array(),
        });
        index
    }

    fn push_quad(&mut self, corners: [Vec2; 4], color: Color) {
        let base = self.push_vertex(corners[0], color);
        for &corner in &corners[1..] {
            self.push_vertex(corner, color);
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn circle_fill(&mut self, center: Vec2, radius: f32, color: Color) {
        let hub = self.push_vertex(center, color);
        for i in 0..CIRCLE_SEGMENTS {
            self.push_vertex(center + rim(i) * radius, color);
        }
        for i in 0..CIRCLE_SEGMENTS {
            let curr = hub + 1 + i;
            let next = hub + 1 + (i + 1) % CIRCLE_SEGMENTS;
            self.indices.extend_from_slice(&[hub, curr, next]);
        }
    }

    fn circle_stroke(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        let inner = (radius - width * 0.5).max(0.0);
        let outer = radius + width * 0.5;
        for i in 0..CIRCLE_SEGMENTS {
            let (a, b) = (rim(i), rim(i + 1));
            self.push_quad(
                [center + a * inner, center + a * outer, center + b * outer, center + b * inner],
                color,
            );
        }
    }

    fn rect_fill(&mut self, top_left: Vec2, size: Vec2, color: Color) {
        let br = top_left + size;
        self.push_quad(
            [top_left, Vec2::new(br.x, top_left.y), br, Vec2::new(top_left.x, br.y)],
            color,
        );
    }

    fn rect_stroke(&mut self, top_left: Vec2, size: Vec2, width: f32, color: Color) {
        let h = width * 0.5;
        let outer_min = top_left - Vec2::splat(h);
        let outer_max = top_left + size + Vec2::splat(h);
        let inner_min = top_left + Vec2::splat(h);
        let inner_max = top_left + size - Vec2::splat(h);
        // Top and bottom bands span the full outer width, sides fill the gap.
        self.rect_fill(outer_min, Vec2::new(outer_max.x - outer_min.x, width), color);
        self.rect_fill(
            Vec2::new(outer_min.x, inner_max.y),
            Vec2::new(outer_max.x - outer_min.x, width),
            color,
        );
        let side_height = (inner_max.y - inner_min.y).max(0.0);
        self.rect_fill(Vec2::new(outer_min.x, inner_min.y), Vec2::new(width, side_height), color);
        self.rect_fill(Vec2::new(inner_max.x, inner_min.y), Vec2::new(width, side_height), color);
    }
}

fn rim(i: u32) -> Vec2 {
    let theta = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
    Vec2::new(theta.cos(), theta.sin())
}

/// Tessellate a frame's commands in order.
pub fn tessellate(commands: &[DrawCommand]) -> Mesh {
    let mut mesh = Mesh::default();
    for command in commands {
        match *command {
            DrawCommand::Clear { color, .. } => {
                mesh.vertices.clear();
                mesh.indices.clear();
                mesh.clear = Some(color);
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                mesh.circle_fill(center, radius, fill);
                if stroke_width > 0.0 {
                    mesh.circle_stroke(center, radius, stroke_width, stroke);
                }
            }
            DrawCommand::Rect {
                top_left,
                size,
                fill,
                stroke,
                stroke_width,
            } => {
                mesh.rect_fill(top_left, size, fill);
                if stroke_width > 0.0 {
                    mesh.rect_stroke(top_left, size, stroke_width, stroke);
                }
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Viewport;
    use crate::render::{DrawList, DrawSurface};

    fn indices_in_range(mesh: &Mesh) -> bool {
        mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len())
    }

    #[test]
    fn circle_fill_and_stroke() {
        let mut list = DrawList::new();
        list.fill_stroke_circle(Vec2::new(50.0, 50.0), 10.0, Color::WHITE, Color::BLACK, 1.0);
        let mesh = tessellate(list.commands());

        // 32 fan triangles + 32 ring quads.
        assert_eq!(mesh.triangle_count(), 32 + 64);
        assert!(indices_in_range(&mesh));
        assert_eq!(mesh.vertices[0].position, [50.0, 50.0]);
    }

    #[test]
    fn zero_width_stroke_is_skipped() {
        let mut list = DrawList::new();
        list.fill_stroke_rect(Vec2::ZERO, Vec2::splat(4.0), Color::WHITE, Color::BLACK, 0.0);
        let mesh = tessellate(list.commands());
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn rect_fill_corners() {
        let mut list = DrawList::new();
        list.fill_stroke_rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Color::WHITE, Color::BLACK, 2.0);
        let mesh = tessellate(list.commands());

        let fill: Vec<_> = mesh.vertices[..4].iter().map(|v| v.position).collect();
        assert_eq!(fill, vec![[1.0, 2.0], [4.0, 2.0], [4.0, 6.0], [1.0, 6.0]]);
        // Fill quad + four stroke bands.
        assert_eq!(mesh.triangle_count(), 2 + 8);
        assert!(indices_in_range(&mesh));
        assert!(mesh.vertices[4..].iter().all(|v| v.color == Color::BLACK.to_array()));
    }

    #[test]
    fn clear_discards_earlier_geometry() {
        let mut list = DrawList::new();
        list.fill_stroke_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE, Color::BLACK, 1.0);
        list.clear(Color::hex(0x102030), Viewport::new(10.0, 10.0));
        list.fill_stroke_circle(Vec2::ZERO, 1.0, Color::WHITE, Color::BLACK, 0.0);
        let mesh = tessellate(list.commands());

        assert_eq!(mesh.clear, Some(Color::hex(0x102030)));
        assert_eq!(mesh.triangle_count(), 32);
    }

    #[test]
    fn later_commands_come_later_in_index_order() {
        let mut list = DrawList::new();
        let red = Color::rgb(1.0, 0.0, 0.0);
        let blue = Color::rgb(0.0, 0.0, 1.0);
        list.fill_stroke_rect(Vec2::ZERO, Vec2::ONE, red, red, 0.0);
        list.fill_stroke_rect(Vec2::ZERO, Vec2::ONE, blue, blue, 0.0);
        let mesh = tessellate(list.commands());

        let last = *mesh.indices.last().unwrap() as usize;
        assert_eq!(mesh.vertices[last].color, blue.to_array());
    }
}
