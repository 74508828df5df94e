//! Click-to-burst in a window. Optional first argument: a JSON config file.
//!
//! ```text
//! cargo run --example burst --features window
//! RUST_LOG=shapeburst=debug cargo run --example burst --features window -- burst.json
//! ```

use shapeburst::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let sim = Simulation::new(config)?;
    shapeburst::window::run(sim, "shapeburst")?;
    Ok(())
}
