//! # System — Per-Frame Logic Over the World
//!
//! A system is anything that can run against `&mut World` once per frame.
//! Systems run in the order they're added to a [`Schedule`]; there is no
//! dependency graph and no parallelism. Order is part of the contract: the
//! movement system must be added before the render system, or the frame
//! draws last frame's positions.
//!
//! ## Failure
//!
//! Systems return `Result<(), EcsError>`. The first error stops the
//! schedule: later systems don't run, and the error comes back to the host
//! wrapped in a [`ScheduleError`] that names the system. Rendering a frame
//! on top of half-applied state is worse than dropping the frame.
//!
//! ## Frame
//!
//! Everything a system may need besides the world (timing, the viewport, the
//! draw target) travels in a [`Frame`] built by the caller for one run.
//! Nothing is global.

use std::time::Instant;

use super::world::{World, short_type_name};
use crate::error::{EcsError, ScheduleError};
use crate::math::Viewport;
use crate::render::DrawSurface;
use crate::time::Time;

/// Per-frame context handed to every system.
pub struct Frame<'a> {
    /// Timing for this frame (`delta` / `elapsed` in milliseconds).
    pub time: Time,
    /// Drawable area at the time of the frame.
    pub viewport: Viewport,
    /// Where the render system draws.
    pub surface: &'a mut dyn DrawSurface,
}

/// A system that can be executed on a [`World`].
///
/// Any `FnMut(&mut World, &mut Frame<'_>) -> Result<(), EcsError>`
/// implements this trait.
pub trait System {
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) -> Result<(), EcsError>;
}

impl<F> System for F
where
    F: FnMut(&mut World, &mut Frame<'_>) -> Result<(), EcsError>,
{
    fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) -> Result<(), EcsError> {
        (self)(world, frame)
    }
}

struct NamedSystem {
    name: String,
    system: Box<dyn System>,
}

/// Wall-clock time one system took during the most recent run.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemTiming {
    pub name: String,
    pub duration_us: f64,
}

/// An ordered list of systems to run.
pub struct Schedule {
    systems: Vec<NamedSystem>,
    timings: Vec<SystemTiming>,
}

impl Schedule {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            timings: Vec::new(),
        }
    }

    /// Add a system to the end of the schedule.
    pub fn add_system<S: System + 'static>(&mut self, system: S) {
        self.systems.push(NamedSystem {
            name: short_system_name(std::any::type_name::<S>()),
            system: Box::new(system),
        });
    }

    /// Run all systems in order. Stops at the first failure.
    pub fn run(&mut self, world: &mut World, frame: &mut Frame<'_>) -> Result<(), ScheduleError> {
        self.timings.clear();
        for ns in &mut self.systems {
            let start = Instant::now();
            let result = ns.system.run(world, frame);
            self.timings.push(SystemTiming {
                name: ns.name.clone(),
                duration_us: start.elapsed().as_secs_f64() * 1_000_000.0,
            });
            result.map_err(|source| ScheduleError::System {
                system: ns.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Number of systems in this schedule.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// System names in execution order.
    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|ns| ns.name.as_str())
    }

    /// Timings from the most recent [`run`](Self::run). A failed run only
    /// has entries up to and including the failing system.
    pub fn timings(&self) -> &[SystemTiming] {
        &self.timings
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip the module path from a type name, keeping the last segment
/// (e.g. `shapeburst::systems::movement::MovementSystem` → `MovementSystem`,
/// `{{closure}}` → `<closure>`).
fn short_system_name(full: &'static str) -> String {
    let name = short_type_name(full);
    if name.contains("{{closure}}") {
        "<closure>".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::marker::PhantomData;
    use std::rc::Rc;

    use super::*;
    use crate::render::DrawList;

    fn noop_system(_world: &mut World, _frame: &mut Frame<'_>) -> Result<(), EcsError> {
        Ok(())
    }

    fn frame(surface: &mut DrawList) -> Frame<'_> {
        Frame {
            time: Time::default(),
            viewport: Viewport::new(800.0, 600.0),
            surface,
        }
    }

    #[test]
    fn schedule_captures_system_name() {
        let mut schedule = Schedule::new();
        schedule.add_system(noop_system);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.system_names().collect::<Vec<_>>(), vec!["noop_system"]);
    }

    #[test]
    fn closure_system_name() {
        let mut schedule = Schedule::new();
        schedule.add_system(|_world: &mut World, _frame: &mut Frame<'_>| Ok::<(), EcsError>(()));
        assert_eq!(schedule.system_names().next(), Some("<closure>"));
    }

    struct Generic<T>(PhantomData<T>);

    impl<T> System for Generic<T> {
        fn run(&mut self, _world: &mut World, _frame: &mut Frame<'_>) -> Result<(), EcsError> {
            Ok(())
        }
    }

    #[test]
    fn generic_system_keeps_its_arguments() {
        let mut schedule = Schedule::new();
        schedule.add_system(Generic::<crate::components::Position>(PhantomData));
        let name = schedule.system_names().next().unwrap_or_default().to_string();
        assert!(name.starts_with("Generic<"), "{name}");
        assert!(name.ends_with("Position>"), "{name}");
    }

    #[test]
    fn runs_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut schedule = Schedule::new();
        for label in ["first", "second"] {
            let log = Rc::clone(&log);
            schedule.add_system(move |_world: &mut World, _frame: &mut Frame<'_>| {
                log.borrow_mut().push(label);
                Ok::<(), EcsError>(())
            });
        }

        let mut world = World::new();
        let mut surface = DrawList::new();
        schedule.run(&mut world, &mut frame(&mut surface)).unwrap();
        assert_eq!(*log.borrow(), vec!["first", "second"]);
        assert_eq!(schedule.timings().len(), 2);
    }

    #[test]
    fn failure_stops_the_frame() {
        let runs = Rc::new(Cell::new(0u32));
        let mut schedule = Schedule::new();
        schedule.add_system(failing_system);
        let counter = Rc::clone(&runs);
        schedule.add_system(move |_world: &mut World, _frame: &mut Frame<'_>| {
            counter.set(counter.get() + 1);
            Ok::<(), EcsError>(())
        });

        let mut world = World::new();
        let mut surface = DrawList::new();
        let err = schedule.run(&mut world, &mut frame(&mut surface)).unwrap_err();
        let ScheduleError::System { system, source } = err;
        assert_eq!(system, "failing_system");
        assert!(matches!(source, EcsError::UnknownEntity(_)));
        // The second system never ran.
        assert_eq!(runs.get(), 0);
        assert_eq!(schedule.timings().len(), 1);
    }

    fn failing_system(world: &mut World, _frame: &mut Frame<'_>) -> Result<(), EcsError> {
        let e = world.create();
        world.destroy(e)?;
        world.destroy(e)
    }
}
