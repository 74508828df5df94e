//! # Entity — Generational Identifiers
//!
//! An [`Entity`] is just a number. The [`World`](super::world::World) maps it
//! to components; the entity itself carries no data.
//!
//! ## Generational Indices
//!
//! Slots are recycled after [`World::destroy`](super::world::World::destroy),
//! so each index is paired with a **generation** counter that is bumped when
//! the slot is freed. A handle kept across a destroy still carries the old
//! generation and is detected as stale:
//!
//! ```text
//! Entity { index: 5, generation: 0 }  ← original
//! Entity { index: 5, generation: 1 }  ← after recycle
//! ```
//!
//! ## Creation Order
//!
//! Queries report entities in the order they were created. Slot indices
//! can't express that once slots are reused, so every allocation also takes
//! a sequence number from a counter that never goes backwards. The sequence
//! lives in the allocator, next to the generation of the same slot.

use std::fmt;

/// A lightweight handle to an entity in the [`World`](super::world::World).
///
/// Only valid for the `World` that created it, and only while its generation
/// matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity {
    /// Slot index in the allocator. Recycled after destroy.
    pub(crate) index: u32,
    /// Bumped each time this slot is reused.
    pub(crate) generation: u32,
}

impl Entity {
    /// Returns the raw index. Useful for diagnostics, not for general use.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation. Useful for diagnostics.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Manages entity ID allocation and recycling.
///
/// ```text
/// generations: [0, 1, 0, 2, 0]   ← one generation per slot ever allocated
/// sequences:   [0, 5, 2, 6, 4]   ← creation sequence of each slot's occupant
/// occupied:    [T, F, T, F, T]
/// free_list:   [1, 3]            ← slots available for reuse
/// ```
pub(crate) struct EntityAllocator {
    generations: Vec<u32>,
    sequences: Vec<u64>,
    occupied: Vec<bool>,
    free_list: Vec<u32>,
    /// Next creation sequence number. Never reused.
    next_sequence: u64,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            sequences: Vec::new(),
            occupied: Vec::new(),
            free_list: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Allocate a new [`Entity`], reusing a freed slot when one is available.
    pub fn allocate(&mut self) -> Entity {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if let Some(index) = self.free_list.pop() {
            // Generation was already bumped on dealloc.
            self.sequences[index as usize] = sequence;
            self.occupied[index as usize] = true;
            Entity {
                index,
                generation: self.generations[index as usize],
            }
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.sequences.push(sequence);
            self.occupied.push(true);
            Entity {
                index,
                generation: 0,
            }
        }
    }

    /// Free an entity's slot. Returns `false` if the handle was already stale.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.generations[entity.index as usize] += 1;
        self.occupied[entity.index as usize] = false;
        self.free_list.push(entity.index);
        true
    }

    /// Check if an entity handle is still valid.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let index = entity.index as usize;
        self.occupied.get(index).copied().unwrap_or(false)
            && self.generations[index] == entity.generation
    }

    /// Creation sequence of a live entity.
    pub fn sequence(&self, entity: Entity) -> Option<u64> {
        if self.is_alive(entity) {
            Some(self.sequences[entity.index as usize])
        } else {
            None
        }
    }

    /// Number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        self.generations.len() - self.free_list.len()
    }

    /// Every live entity with its creation sequence, in slot order.
    pub fn live(&self) -> impl Iterator<Item = (u64, Entity)> + '_ {
        self.occupied
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(index, _)| {
                let entity = Entity {
                    index: index as u32,
                    generation: self.generations[index],
                };
                (self.sequences[index], entity)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_sequential() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_eq!(e0.index, 0);
        assert_eq!(e1.index, 1);
        assert_eq!(alloc.sequence(e0), Some(0));
        assert_eq!(alloc.sequence(e1), Some(1));
    }

    #[test]
    fn recycle_bumps_generation_and_sequence() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let _e1 = alloc.allocate();
        assert!(alloc.deallocate(e0));

        let reused = alloc.allocate();
        assert_eq!(reused.index, 0);
        assert_eq!(reused.generation, 1);
        // Reused slot still sorts after everything created before it.
        assert_eq!(alloc.sequence(reused), Some(2));
    }

    #[test]
    fn stale_handle_detected() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        assert!(!alloc.is_alive(e0));
        assert_eq!(alloc.sequence(e0), None);
    }

    #[test]
    fn double_free_returns_false() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        assert!(alloc.deallocate(e0));
        assert!(!alloc.deallocate(e0));
    }

    #[test]
    fn freed_slot_is_not_alive_under_next_generation() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        alloc.deallocate(e0);
        let next = Entity {
            index: 0,
            generation: 1,
        };
        assert!(!alloc.is_alive(next));
    }

    #[test]
    fn alive_count_and_live() {
        let mut alloc = EntityAllocator::new();
        let e0 = alloc.allocate();
        let e1 = alloc.allocate();
        assert_eq!(alloc.alive_count(), 2);
        alloc.deallocate(e0);
        assert_eq!(alloc.alive_count(), 1);
        assert_eq!(alloc.live().collect::<Vec<_>>(), vec![(1, e1)]);
    }
}
