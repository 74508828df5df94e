use quickcheck_macros::quickcheck;
use shapeburst::prelude::*;
use shapeburst::systems::MovementSystem;

const W: f32 = 800.0;
const H: f32 = 600.0;
const MARGIN: f32 = 10.0;

fn wrap(v: f32, extent: f32) -> f32 {
    if v > extent + MARGIN {
        -MARGIN
    } else if v < -MARGIN {
        extent + MARGIN
    } else {
        v
    }
}

/// One movement step matches `p + v * delta` followed by the wrap rule.
#[quickcheck]
fn movement_is_exact(px: u16, py: u16, vx: i8, vy: i8, delta: u8) -> bool {
    let start = Position::new(px as f32 % (W + 2.0 * MARGIN) - MARGIN, py as f32 % (H + 2.0 * MARGIN) - MARGIN);
    let velocity = Velocity::new(vx as f32 / 1000.0, vy as f32 / 1000.0);
    let delta = delta as f32;

    let mut world = World::new();
    let mut movement = MovementSystem::new(&mut world, MARGIN);
    let e = world.spawn((start, velocity));

    let mut surface = DrawList::new();
    let mut time = Time::default();
    time.advance(delta, delta as f64);
    let mut frame = Frame {
        time,
        viewport: Viewport::new(W, H),
        surface: &mut surface,
    };
    movement.run(&mut world, &mut frame).unwrap();

    let expected = Position::new(
        wrap(start.x + velocity.x * delta, W),
        wrap(start.y + velocity.y * delta, H),
    );
    world.get::<Position>(e) == Ok(&expected)
}

struct A;
struct B;

/// After any sequence of attach/detach, queries hold exactly the owners,
/// in creation order.
#[quickcheck]
fn queries_track_attach_and_detach(ops: Vec<(u8, bool, bool)>) -> bool {
    let mut world = World::new();
    let entities: Vec<Entity> = (0..8).map(|_| world.create()).collect();
    let only_a = world.register_query::<(A,)>();
    let both = world.register_query::<(A, B)>();

    let mut has_a = [false; 8];
    let mut has_b = [false; 8];
    for (slot, second, attach) in ops {
        let i = slot as usize % entities.len();
        let e = entities[i];
        let (flags, ok) = match (second, attach) {
            (false, true) => (&mut has_a, world.attach(e, A).is_ok()),
            (false, false) => (&mut has_a, world.detach::<A>(e).is_ok()),
            (true, true) => (&mut has_b, world.attach(e, B).is_ok()),
            (true, false) => (&mut has_b, world.detach::<B>(e).is_ok()),
        };
        // Attach fails exactly when present, detach exactly when absent.
        if ok != (flags[i] != attach) {
            return false;
        }
        flags[i] = attach;

        let expect_a: Vec<Entity> = (0..8).filter(|&j| has_a[j]).map(|j| entities[j]).collect();
        let expect_both: Vec<Entity> = (0..8)
            .filter(|&j| has_a[j] && has_b[j])
            .map(|j| entities[j])
            .collect();
        if world.query_by_id(only_a) != expect_a || world.query_by_id(both) != expect_both {
            return false;
        }
    }
    true
}

/// Attaching then detaching leaves a query exactly as it was.
#[quickcheck]
fn attach_detach_is_invisible_to_queries(members: Vec<bool>, pick: u8) -> bool {
    let mut world = World::new();
    let q = world.register_query::<(A,)>();
    let mut entities = Vec::new();
    for member in members {
        let e = world.create();
        if member {
            world.attach(e, A).unwrap();
        }
        entities.push(e);
    }
    let before = world.query_by_id(q);

    let target = match entities.get(pick as usize % entities.len().max(1)) {
        Some(&e) if !world.has::<A>(e) => e,
        _ => world.create(),
    };
    world.attach(target, A).unwrap();
    world.detach::<A>(target).unwrap();
    world.query_by_id(q) == before
}
