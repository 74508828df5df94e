use approx::assert_relative_eq;
use shapeburst::prelude::*;

fn one_per_click() -> SimConfig {
    SimConfig {
        batch_size: 1,
        viewport: Viewport::new(800.0, 600.0),
        ..SimConfig::default()
    }
}

#[test]
fn click_then_frame_draws_one_moved_box() {
    // vx = 0.1 * (2 * 0.75 - 1) = 0.05, vy = 0.1 * (2 * 0.25 - 1) = -0.05,
    // primitive 0.1 → box, side = 10 - 10 * 0.2 = 8, lifetime 2000 ms.
    let sampler = ScriptedSampler::new(&[0.75, 0.25, 0.1, 0.2, 0.5]);
    let mut sim = Simulation::with_sampler(one_per_click(), Box::new(sampler)).unwrap();

    let spawned = sim.pointer_click(100.0, 100.0);
    assert_eq!(spawned.len(), 1);
    let e = spawned[0];

    let mut surface = DrawList::new();
    sim.frame(10.0, 10.0, &mut surface).unwrap();

    let pos = *sim.world().get::<Position>(e).unwrap();
    assert_relative_eq!(pos.x, 100.5, epsilon = 1e-4);
    assert_relative_eq!(pos.y, 99.5, epsilon = 1e-4);

    assert_eq!(surface.clear_count(), 1);
    let shapes: Vec<_> = surface.shapes().collect();
    assert_eq!(shapes.len(), 1);
    match *shapes[0] {
        DrawCommand::Rect { top_left, size, fill, stroke, .. } => {
            let center = top_left + size * 0.5;
            assert_relative_eq!(center.x, 100.5, epsilon = 1e-4);
            assert_relative_eq!(center.y, 99.5, epsilon = 1e-4);
            assert_relative_eq!(size.x, 8.0);
            assert_relative_eq!(size.y, 8.0);
            assert_eq!(fill, Color::hex(0xf28d89));
            assert_eq!(stroke, Color::hex(0x800904));
        }
        ref other => panic!("expected a box, got {other:?}"),
    }
}

#[test]
fn burst_spawns_forty_visible_entities() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(2024),
        ..SimConfig::default()
    })
    .unwrap();
    let mut surface = DrawList::new();
    sim.frame(16.0, 250.0, &mut surface).unwrap();

    let spawned = sim.pointer_click(400.0, 300.0);
    assert_eq!(spawned.len(), 40);
    for &e in &spawned {
        assert!(sim.world().has::<Renderable>(e));
        assert_eq!(sim.world().get::<Position>(e), Ok(&Position::new(400.0, 300.0)));
        let v = sim.world().get::<Velocity>(e).unwrap();
        assert!(v.x.abs() <= 0.1 && v.y.abs() <= 0.1);
        let half = sim.world().get::<Shape>(e).unwrap().half_extent();
        assert!(half > 0.0 && half <= 10.0);
    }

    let stats = sim.stats();
    assert_eq!(stats.visible, 40);
    assert_eq!(stats.pending_expiries, 40);
    let next_due = sim.lifecycle().next_due().unwrap();
    assert!(next_due > 250.0 && next_due <= 250.0 + 4000.0);
}

#[test]
fn everything_expires_within_max_lifetime() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(5),
        ..SimConfig::default()
    })
    .unwrap();
    sim.pointer_click(10.0, 10.0);
    sim.pointer_click(20.0, 20.0);

    let mut surface = DrawList::new();
    let mut elapsed = 0.0;
    while elapsed < 4000.0 {
        elapsed += 16.0;
        surface.reset();
        sim.frame(16.0, elapsed, &mut surface).unwrap();
    }
    assert_eq!(surface.shapes().count(), 0);
    assert_eq!(sim.stats().entities, 0);
    assert_eq!(sim.stats().destroyed_total, 80);
}

#[test]
fn hidden_entities_leak_under_hide_action() {
    let mut sim = Simulation::new(SimConfig {
        seed: Some(5),
        expire_action: ExpireAction::Hide,
        ..SimConfig::default()
    })
    .unwrap();
    sim.pointer_click(10.0, 10.0);

    let mut surface = DrawList::new();
    sim.frame(16.0, 5000.0, &mut surface).unwrap();
    let stats = sim.stats();
    assert_eq!(stats.entities, 40);
    assert_eq!(stats.visible, 0);
    assert_eq!(surface.shapes().count(), 0);
}

#[test]
fn expiry_for_externally_destroyed_entity_is_harmless() {
    let sampler = ScriptedSampler::new(&[0.5, 0.5, 0.5, 0.5, 0.5]);
    let mut sim = Simulation::with_sampler(one_per_click(), Box::new(sampler)).unwrap();
    let e = sim.pointer_click(1.0, 1.0)[0];
    sim.world_mut().destroy(e).unwrap();

    let mut surface = DrawList::new();
    sim.frame(16.0, 10_000.0, &mut surface).unwrap();
    assert_eq!(sim.stats().pending_expiries, 0);
}

#[test]
fn config_file_drives_the_simulation() {
    let path = std::env::temp_dir().join(format!("shapeburst-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"batch_size": 3, "seed": 1, "expire_action": "hide"}"#).unwrap();
    let config = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let mut sim = Simulation::new(config).unwrap();
    assert_eq!(sim.pointer_click(0.0, 0.0).len(), 3);
    assert_eq!(sim.config().expire_action, ExpireAction::Hide);
}
