//! Draws every visible shape, back to front in creation order.
//!
//! Each frame starts with a full clear to the background color. Then every
//! entity with `{Renderable, Shape, Position}` is drawn centred on its
//! position: circles with their radius, boxes offset by half their side.

use crate::components::{Position, Renderable, Shape};
use crate::config::Palette;
use crate::ecs::{Frame, QueryId, System, World};
use crate::error::EcsError;
use crate::math::Vec2;

pub struct RenderSystem {
    query: QueryId,
    palette: Palette,
    stroke_width: f32,
}

impl RenderSystem {
    pub fn new(world: &mut World, palette: Palette, stroke_width: f32) -> Self {
        Self {
            query: world.register_query::<(Renderable, Shape, Position)>(),
            palette,
            stroke_width,
        }
    }

    /// Handle of the visible-shapes query.
    pub fn query(&self) -> QueryId {
        self.query
    }
}

impl System for RenderSystem {
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) -> Result<(), EcsError> {
        let palette = &self.palette;
        frame.surface.clear(palette.background, frame.viewport);

        for entity in world.query_by_id(self.query) {
            let center: Vec2 = (*world.get::<Position>(entity)?).into();
            match *world.get::<Shape>(entity)? {
                Shape::Circle { radius } => frame.surface.fill_stroke_circle(
                    center,
                    radius,
                    palette.circle_fill,
                    palette.circle_stroke,
                    self.stroke_width,
                ),
                Shape::Box { side } => frame.surface.fill_stroke_rect(
                    center - Vec2::splat(side * 0.5),
                    Vec2::splat(side),
                    palette.box_fill,
                    palette.box_stroke,
                    self.stroke_width,
                ),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Velocity;
    use crate::math::Viewport;
    use crate::render::{DrawCommand, DrawList};
    use crate::time::Time;

    fn draw(world: &mut World, system: &mut RenderSystem) -> DrawList {
        let mut surface = DrawList::new();
        let mut frame = Frame {
            time: Time::default(),
            viewport: Viewport::new(800.0, 600.0),
            surface: &mut surface,
        };
        system.run(world, &mut frame).unwrap();
        surface
    }

    #[test]
    fn clears_once_then_draws_in_creation_order() {
        let mut world = World::new();
        let mut system = RenderSystem::new(&mut world, Palette::default(), 1.0);
        world.spawn((Renderable, Shape::Circle { radius: 3.0 }, Position::new(1.0, 1.0)));
        world.spawn((Renderable, Shape::Box { side: 4.0 }, Position::new(10.0, 10.0)));

        let list = draw(&mut world, &mut system);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(list.clear_count(), 1);

        let shapes: Vec<_> = list.shapes().copied().collect();
        assert_eq!(
            shapes,
            vec![
                DrawCommand::Circle {
                    center: Vec2::new(1.0, 1.0),
                    radius: 3.0,
                    fill: Palette::default().circle_fill,
                    stroke: Palette::default().circle_stroke,
                    stroke_width: 1.0,
                },
                DrawCommand::Rect {
                    top_left: Vec2::new(8.0, 8.0),
                    size: Vec2::new(4.0, 4.0),
                    fill: Palette::default().box_fill,
                    stroke: Palette::default().box_stroke,
                    stroke_width: 1.0,
                },
            ]
        );
    }

    #[test]
    fn later_entity_draws_over_earlier_at_same_point() {
        let mut world = World::new();
        let mut system = RenderSystem::new(&mut world, Palette::default(), 1.0);
        let at = Position::new(50.0, 50.0);
        world.spawn((Renderable, Shape::Box { side: 6.0 }, at));
        world.spawn((Renderable, Shape::Circle { radius: 2.0 }, at));

        let list = draw(&mut world, &mut system);
        let shapes: Vec<_> = list.shapes().collect();
        assert_eq!(shapes.len(), 2);
        assert!(matches!(
            *shapes[0],
            DrawCommand::Rect { top_left, .. } if top_left == Vec2::new(47.0, 47.0)
        ));
        assert!(matches!(
            *shapes[1],
            DrawCommand::Circle { center, .. } if center == Vec2::new(50.0, 50.0)
        ));

        // Re-showing the box doesn't move it above the circle.
        let first = world.query_by_id(system.query())[0];
        world.detach::<Renderable>(first).unwrap();
        world.attach(first, Renderable).unwrap();
        let list = draw(&mut world, &mut system);
        let shapes: Vec<_> = list.shapes().collect();
        assert!(matches!(*shapes[0], DrawCommand::Rect { .. }));
        assert!(matches!(*shapes[1], DrawCommand::Circle { .. }));
    }

    #[test]
    fn skips_entities_without_renderable() {
        let mut world = World::new();
        let mut system = RenderSystem::new(&mut world, Palette::default(), 1.0);
        let e = world.spawn((
            Renderable,
            Shape::Circle { radius: 3.0 },
            Position::new(1.0, 1.0),
            Velocity::new(0.0, 0.0),
        ));
        world.detach::<Renderable>(e).unwrap();

        let list = draw(&mut world, &mut system);
        assert_eq!(list.len(), 1);
        assert_eq!(world.query_len(system.query()), 0);
    }

    #[test]
    fn empty_world_still_clears() {
        let mut world = World::new();
        let mut system = RenderSystem::new(&mut world, Palette::default(), 1.0);
        let list = draw(&mut world, &mut system);
        assert_eq!(list.clear_count(), 1);
        assert_eq!(list.len(), 1);
    }
}
