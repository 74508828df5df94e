//! # Component — Sparse Per-Type Storage
//!
//! Components are plain data: a `Position`, a `Velocity`, a marker tag. The
//! world keeps one storage per component type, keyed by [`TypeId`], and each
//! storage maps entities to their value.
//!
//! ## Sparse Sets
//!
//! ```text
//! sparse:  [Some(1), None, Some(0), None]   ← indexed by Entity::index
//! dense:   [vel2,    vel0]                   ← packed values
//! owners:  [e2,      e0  ]                   ← parallel to dense
//! ```
//!
//! Attach and detach are O(1): insert pushes onto `dense`, remove
//! swap-removes and patches the `sparse` entry of the value that moved. This
//! suits a world where a tag (`Renderable`) comes and goes on many entities
//! while the rest of their components stay put.
//!
//! ## Type Erasure
//!
//! The world holds `Box<dyn ComponentStorage>` and downcasts to the typed
//! [`SparseStorage<T>`] through `Any`. No unsafe code: a failed downcast means
//! a storage was filed under the wrong `TypeId`, which is a bug in the world
//! itself and panics.

use std::any::Any;

use super::entity::Entity;

/// Object-safe view of a [`SparseStorage<T>`] with the type erased.
pub(crate) trait ComponentStorage: Any + Send + Sync {
    /// Whether `entity` owns a value in this storage.
    fn contains(&self, entity: Entity) -> bool;

    /// Drop `entity`'s value, if any. Used when an entity is destroyed.
    fn remove_entity(&mut self, entity: Entity) -> bool;

    /// Number of values stored.
    fn len(&self) -> usize;

    /// Full type name of the component, for errors and diagnostics.
    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Packed storage for one component type.
pub(crate) struct SparseStorage<T> {
    sparse: Vec<Option<usize>>,
    dense: Vec<T>,
    owners: Vec<Entity>,
}

impl<T: 'static + Send + Sync> SparseStorage<T> {
    pub fn new() -> Self {
        Self {
            sparse: Vec::new(),
            dense: Vec::new(),
            owners: Vec::new(),
        }
    }

    fn slot(&self, entity: Entity) -> Option<usize> {
        let slot = (*self.sparse.get(entity.index as usize)?)?;
        // A stale handle shares the index but not the generation.
        (self.owners[slot] == entity).then_some(slot)
    }

    /// Store `value` for `entity`. Hands the value back if one is already
    /// present; the existing value is left untouched.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<(), T> {
        if self.slot(entity).is_some() {
            return Err(value);
        }
        let index = entity.index as usize;
        if self.sparse.len() <= index {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(self.dense.len());
        self.dense.push(value);
        self.owners.push(entity);
        Ok(())
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slot(entity).map(|slot| &mut self.dense[slot])
    }

    /// Swap-remove `entity`'s value and return it.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slot(entity)?;
        self.sparse[entity.index as usize] = None;

        let value = self.dense.swap_remove(slot);
        self.owners.swap_remove(slot);

        // Whatever was last now lives in `slot`.
        if let Some(&moved) = self.owners.get(slot) {
            self.sparse[moved.index as usize] = Some(slot);
        }
        Some(value)
    }
}

impl<T: 'static + Send + Sync> ComponentStorage for SparseStorage<T> {
    fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn len(&self) -> usize {
        self.dense.len()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
