//! Headless run: scripted clicks, a fixed 60 Hz clock, and a printout of
//! what each sampled frame would draw.

use shapeburst::prelude::*;

const FRAME_MS: f32 = 1000.0 / 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut sim = Simulation::new(SimConfig {
        seed: Some(7),
        ..SimConfig::default()
    })?;
    let clicks = [(60, 200.0, 150.0), (90, 600.0, 450.0)];

    let mut surface = DrawList::new();
    let mut elapsed = 0.0f64;
    for frame in 0..360u32 {
        for &(at, x, y) in &clicks {
            if frame == at {
                sim.pointer_click(x, y);
                println!("frame {frame:>3}: click at ({x}, {y})");
            }
        }

        elapsed += FRAME_MS as f64;
        surface.reset();
        sim.frame(FRAME_MS, elapsed, &mut surface)?;

        if frame % 30 == 0 {
            let (mut circles, mut boxes) = (0, 0);
            for command in surface.shapes() {
                match command {
                    DrawCommand::Circle { .. } => circles += 1,
                    DrawCommand::Rect { .. } => boxes += 1,
                    DrawCommand::Clear { .. } => {}
                }
            }
            let stats = sim.stats();
            println!(
                "frame {frame:>3}: {circles:>2} circles, {boxes:>2} boxes, {} alive, {} pending",
                stats.entities, stats.pending_expiries
            );
        }
    }
    Ok(())
}
