//! # Query — Live Entity Sets by Component Type
//!
//! A query names a set of component types. The world answers with every
//! entity that owns all of them, in creation order.
//!
//! ## Incremental Maintenance
//!
//! ```text
//! world.register_query::<(Velocity, Position)>()
//!
//! 1. Sort + dedup the TypeIds          → required = [Position, Velocity]
//! 2. Scan every live entity once       → initial matches
//! 3. From then on, every attach/detach of a required type re-checks
//!    just that entity, and destroy removes it outright.
//! ```
//!
//! A system therefore never rescans the world. Results stay correct between
//! any two store operations, not only at frame boundaries, so a click that
//! lands mid-run is visible to the very next query read.
//!
//! Matches are keyed by the entity's creation sequence in a `BTreeMap`,
//! which yields creation order for free and keeps results deterministic.
//! Writing through `get_mut` never touches a query: only attach, detach and
//! destroy change membership.

use std::any::TypeId;
use std::collections::BTreeMap;

use super::entity::Entity;

/// A tuple of component types to query for, e.g. `(Velocity, Position)`.
///
/// Implemented for tuples of up to 8 `'static + Send + Sync` types.
pub trait ComponentSet {
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_component_set {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> ComponentSet for ($($T,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$T>()),+]
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

/// Handle to a query registered with a [`World`](super::world::World).
///
/// Only meaningful for the world that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryId(pub(crate) usize);

/// Sort and dedup a requirement list so `(A, B)` and `(B, A)` share state.
pub(crate) fn query_key(mut type_ids: Vec<TypeId>) -> Vec<TypeId> {
    type_ids.sort();
    type_ids.dedup();
    type_ids
}

/// Cached result set for one registered query.
pub(crate) struct QueryState {
    required: Vec<TypeId>,
    /// Creation sequence → entity. Iterates in creation order.
    matches: BTreeMap<u64, Entity>,
}

impl QueryState {
    pub fn new(required: Vec<TypeId>) -> Self {
        Self {
            required,
            matches: BTreeMap::new(),
        }
    }

    pub fn required(&self) -> &[TypeId] {
        &self.required
    }

    /// Whether a change to `type_id` can affect this query.
    pub fn involves(&self, type_id: TypeId) -> bool {
        self.required.binary_search(&type_id).is_ok()
    }

    /// Record the current match status of one entity.
    pub fn set(&mut self, sequence: u64, entity: Entity, matched: bool) {
        if matched {
            self.matches.insert(sequence, entity);
        } else {
            self.matches.remove(&sequence);
        }
    }

    pub fn remove(&mut self, sequence: u64) {
        self.matches.remove(&sequence);
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.matches.values().copied()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct A;
    struct B;

    #[test]
    fn key_is_order_independent() {
        assert_eq!(
            query_key(<(A, B)>::type_ids()),
            query_key(<(B, A)>::type_ids())
        );
        assert_eq!(query_key(<(A, A)>::type_ids()).len(), 1);
    }

    #[test]
    fn involves_only_required_types() {
        let state = QueryState::new(query_key(<(A,)>::type_ids()));
        assert!(state.involves(TypeId::of::<A>()));
        assert!(!state.involves(TypeId::of::<B>()));
    }

    #[test]
    fn iterates_in_sequence_order() {
        let mut state = QueryState::new(vec![]);
        let e = |index| Entity { index, generation: 0 };
        state.set(7, e(0), true);
        state.set(2, e(5), true);
        state.set(4, e(1), true);
        state.set(4, e(1), false);

        let order: Vec<_> = state.entities().map(|e| e.index).collect();
        assert_eq!(order, vec![5, 0]);
        assert_eq!(state.len(), 2);
    }
}
