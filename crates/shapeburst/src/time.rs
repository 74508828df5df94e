//! Frame timing and delta time.
//!
//! Time is measured in **milliseconds**, the way a browser animation loop
//! reports it. Velocities are pixels per millisecond and lifetimes are
//! milliseconds, so `delta` multiplies straight into positions.
//!
//! - [`FrameClock`] turns wall-clock instants into `(delta, elapsed)` pairs.
//!   Hosts own one; tests skip it and feed numbers directly.
//! - [`Time`] is what systems see: the values for the current frame plus a
//!   frame counter.

use std::time::Instant;

/// Timing for the current frame. Updated by the simulation before systems run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Milliseconds since the previous frame.
    delta: f32,
    /// Milliseconds since the host started.
    elapsed: f64,
    /// Frames run so far, including the current one.
    frame_count: u64,
}

impl Time {
    /// Record the start of a new frame.
    pub fn advance(&mut self, delta: f32, elapsed: f64) {
        self.delta = delta;
        self.elapsed = elapsed;
        self.frame_count += 1;
    }

    /// Milliseconds since the previous frame.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Milliseconds since the host started.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Estimated FPS based on the last frame's delta.
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1000.0 / self.delta
        } else {
            0.0
        }
    }
}

/// Wall-clock source for frame ticks.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    startup: Instant,
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            startup: now,
            last: now,
        }
    }

    /// Advance to now. Returns `(delta, elapsed)` in milliseconds.
    pub fn tick(&mut self) -> (f32, f64) {
        let now = Instant::now();
        let delta = (now - self.last).as_secs_f32() * 1000.0;
        self.last = now;
        (delta, self.elapsed_ms(now))
    }

    /// Milliseconds since the clock was created, without advancing.
    pub fn now(&self) -> f64 {
        self.elapsed_ms(Instant::now())
    }

    fn elapsed_ms(&self, now: Instant) -> f64 {
        (now - self.startup).as_secs_f64() * 1000.0
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
