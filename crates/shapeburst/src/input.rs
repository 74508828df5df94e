//! Pointer and button input state.
//!
//! The host keeps the latest [`CursorPosition`] and an [`Input`] set per
//! device, and turns a primary-button press into
//! [`Simulation::pointer_click`](crate::Simulation::pointer_click) at the
//! current cursor position. The simulation itself never reads input.

use std::collections::HashSet;
use std::hash::Hash;

#[cfg(feature = "window")]
pub use winit::event::MouseButton;

/// Which inputs (keys or mouse buttons) are currently held.
///
/// The host acts on press edges only, so holding a button down doesn't
/// spawn a burst per repeat event.
#[derive(Debug, Clone)]
pub struct Input<T: Eq + Hash + Copy> {
    held: HashSet<T>,
}

impl<T: Eq + Hash + Copy> Input<T> {
    pub fn new() -> Self {
        Self { held: HashSet::new() }
    }

    /// Record a press. Returns `true` if it wasn't already held, i.e. this
    /// is an edge the host should act on.
    pub fn press(&mut self, input: T) -> bool {
        self.held.insert(input)
    }

    /// Record a release.
    pub fn release(&mut self, input: T) {
        self.held.remove(&input);
    }

    /// Forget every held input. Called when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}

impl<T: Eq + Hash + Copy> Default for Input<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse cursor position in window coordinates (pixels, origin top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CursorPosition {
    pub x: f32,
    pub y: f32,
}
