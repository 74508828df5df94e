//! # World — The Central Container
//!
//! The [`World`] owns all entities, components and queries. It's
//! the single source of truth for the simulation state.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ World                                                │
//! │                                                      │
//! │  EntityAllocator: generations + creation sequence    │
//! │                                                      │
//! │  storages: HashMap<TypeId, Box<dyn ComponentStorage>>│
//! │    one sparse set per component type                 │
//! │                                                      │
//! │  queries: Vec<QueryState>                            │
//! │    live match sets, patched on attach/detach/destroy │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors Instead of Panics
//!
//! Every entity operation returns `Result<_, EcsError>`. Systems propagate
//! with `?`, so a bad handle aborts the frame instead of bringing the
//! process down. The expiry queue relies on this to treat "already gone" as
//! a normal outcome.

use std::any::TypeId;
use std::collections::HashMap;

use super::component::{ComponentStorage, SparseStorage};
use super::entity::{Entity, EntityAllocator};
use super::query::{ComponentSet, QueryId, QueryState, query_key};
use crate::error::EcsError;

/// The central container for all simulation state.
pub struct World {
    allocator: EntityAllocator,
    /// One sparse storage per component type.
    storages: HashMap<TypeId, Box<dyn ComponentStorage>>,
    /// Registered queries, indexed by [`QueryId`].
    queries: Vec<QueryState>,
    /// Sorted requirement list → query, so equal queries share state.
    query_lookup: HashMap<Vec<TypeId>, QueryId>,
    spawned_total: u64,
    destroyed_total: u64,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            storages: HashMap::new(),
            queries: Vec::new(),
            query_lookup: HashMap::new(),
            spawned_total: 0,
            destroyed_total: 0,
        }
    }

    // ── Entity Management ────────────────────────────────────────────

    /// Create an entity with no components.
    pub fn create(&mut self) -> Entity {
        self.spawned_total += 1;
        self.allocator.allocate()
    }

    /// Destroy an entity, dropping all of its components and freeing its id.
    ///
    /// Fails with [`EcsError::UnknownEntity`] if the handle is stale or was
    /// already destroyed.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), EcsError> {
        let sequence = self.sequence(entity)?;
        for storage in self.storages.values_mut() {
            storage.remove_entity(entity);
        }
        for query in &mut self.queries {
            query.remove(sequence);
        }
        self.allocator.deallocate(entity);
        self.destroyed_total += 1;
        Ok(())
    }

    /// Check if an entity is alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.allocator.is_alive(entity)
    }

    /// Number of alive entities.
    pub fn entity_count(&self) -> usize {
        self.allocator.alive_count()
    }

    fn sequence(&self, entity: Entity) -> Result<u64, EcsError> {
        self.allocator
            .sequence(entity)
            .ok_or(EcsError::UnknownEntity(entity))
    }

    // ── Per-Entity Component Access ──────────────────────────────────

    fn storage<T: 'static + Send + Sync>(&self) -> Option<&SparseStorage<T>> {
        self.storages.get(&TypeId::of::<T>()).map(|s| {
            s.as_any()
                .downcast_ref::<SparseStorage<T>>()
                .expect("component storage filed under the wrong TypeId")
        })
    }

    fn storage_mut<T: 'static + Send + Sync>(&mut self) -> Option<&mut SparseStorage<T>> {
        self.storages.get_mut(&TypeId::of::<T>()).map(|s| {
            s.as_any_mut()
                .downcast_mut::<SparseStorage<T>>()
                .expect("component storage filed under the wrong TypeId")
        })
    }

    fn missing<T>(entity: Entity) -> EcsError {
        EcsError::MissingComponent {
            entity,
            component: short_type_name(std::any::type_name::<T>()),
        }
    }

    /// Whether a live entity owns a component of type `T`.
    pub fn has<T: 'static + Send + Sync>(&self, entity: Entity) -> bool {
        self.is_alive(entity) && self.storage::<T>().is_some_and(|s| s.get(entity).is_some())
    }

    /// Shared reference to `entity`'s `T`.
    pub fn get<T: 'static + Send + Sync>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.sequence(entity)?;
        self.storage::<T>()
            .and_then(|s| s.get(entity))
            .ok_or_else(|| Self::missing::<T>(entity))
    }

    /// Mutable reference to `entity`'s `T`. Writes are visible to every
    /// later read; query membership is unaffected.
    pub fn get_mut<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.sequence(entity)?;
        self.storage_mut::<T>()
            .and_then(|s| s.get_mut(entity))
            .ok_or_else(|| Self::missing::<T>(entity))
    }

    // ── Attach / Detach ──────────────────────────────────────────────

    /// Attach a component. Fails if the entity is dead or already has one
    /// of this type; the existing value is never replaced.
    pub fn attach<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        let sequence = self.sequence(entity)?;
        self.insert_component(entity, component)?;
        self.refresh_queries(sequence, entity, Some(TypeId::of::<T>()));
        Ok(())
    }

    /// Detach a component and hand it back.
    pub fn detach<T: 'static + Send + Sync>(&mut self, entity: Entity) -> Result<T, EcsError> {
        let sequence = self.sequence(entity)?;
        let value = self
            .storage_mut::<T>()
            .and_then(|s| s.remove(entity))
            .ok_or_else(|| Self::missing::<T>(entity))?;
        self.refresh_queries(sequence, entity, Some(TypeId::of::<T>()));
        Ok(value)
    }

    fn insert_component<T: 'static + Send + Sync>(&mut self, entity: Entity, component: T) -> Result<(), EcsError> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseStorage::<T>::new()) as Box<dyn ComponentStorage>)
            .as_any_mut()
            .downcast_mut::<SparseStorage<T>>()
            .expect("component storage filed under the wrong TypeId");
        storage
            .insert(entity, component)
            .map_err(|_| EcsError::DuplicateComponent {
                entity,
                component: short_type_name(std::any::type_name::<T>()),
            })
    }

    /// Re-evaluate one entity against every query touched by `changed`
    /// (all queries when `None`).
    fn refresh_queries(&mut self, sequence: u64, entity: Entity, changed: Option<TypeId>) {
        let storages = &self.storages;
        for query in &mut self.queries {
            if changed.is_some_and(|tid| !query.involves(tid)) {
                continue;
            }
            let matched = query
                .required()
                .iter()
                .all(|tid| storages.get(tid).is_some_and(|s| s.contains(entity)));
            query.set(sequence, entity, matched);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Register a query for the component set `Q` and return its handle.
    ///
    /// Registering the same set twice (in any order) returns the same
    /// handle. The first registration scans live entities once; afterwards
    /// the result set is kept up to date by attach/detach/destroy.
    pub fn register_query<Q: ComponentSet>(&mut self) -> QueryId {
        self.register_query_ids(Q::type_ids())
    }

    fn register_query_ids(&mut self, type_ids: Vec<TypeId>) -> QueryId {
        let key = query_key(type_ids);
        if let Some(&id) = self.query_lookup.get(&key) {
            return id;
        }

        let mut state = QueryState::new(key.clone());
        for (sequence, entity) in self.allocator.live() {
            let matched = key
                .iter()
                .all(|tid| self.storages.get(tid).is_some_and(|s| s.contains(entity)));
            state.set(sequence, entity, matched);
        }

        let id = QueryId(self.queries.len());
        self.queries.push(state);
        self.query_lookup.insert(key, id);
        id
    }

    /// Current matches for `Q`, in creation order. Registers the query on
    /// first use.
    pub fn query<Q: ComponentSet>(&mut self) -> Vec<Entity> {
        let id = self.register_query::<Q>();
        self.query_by_id(id)
    }

    /// Current matches for a registered query, in creation order.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different world.
    pub fn query_by_id(&self, id: QueryId) -> Vec<Entity> {
        self.query_state(id).entities().collect()
    }

    /// Number of entities currently matching a registered query.
    pub fn query_len(&self, id: QueryId) -> usize {
        self.query_state(id).len()
    }

    fn query_state(&self, id: QueryId) -> &QueryState {
        self.queries
            .get(id.0)
            .unwrap_or_else(|| panic!("{:?} was not registered with this world", id))
    }

    // ── Diagnostics ──────────────────────────────────────────────────

    /// Entities created / destroyed since the world was built.
    pub fn lifetime_counts(&self) -> (u64, u64) {
        (self.spawned_total, self.destroyed_total)
    }

    /// Stored value count per component type, sorted by name.
    pub fn component_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<_> = self
            .storages
            .values()
            .map(|s| (short_type_name(s.type_name()), s.len()))
            .collect();
        counts.sort();
        counts
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

// ── Spawn Trait (tuple support) ──────────────────────────────────────────

/// A tuple of components attached together by [`World::spawn`].
///
/// Implemented for tuples of up to 8 components. Component types must be
/// distinct.
pub trait SpawnBundle {
    fn attach_all(self, world: &mut World, entity: Entity) -> Result<(), EcsError>;
}

macro_rules! impl_spawn_bundle {
    ($($T:ident),+) => {
        impl<$($T: 'static + Send + Sync),+> SpawnBundle for ($($T,)+) {
            #[allow(non_snake_case)]
            fn attach_all(self, world: &mut World, entity: Entity) -> Result<(), EcsError> {
                let ($($T,)+) = self;
                $(world.insert_component(entity, $T)?;)+
                Ok(())
            }
        }
    };
}

impl_spawn_bundle!(A);
impl_spawn_bundle!(A, B);
impl_spawn_bundle!(A, B, C);
impl_spawn_bundle!(A, B, C, D);
impl_spawn_bundle!(A, B, C, D, E);
impl_spawn_bundle!(A, B, C, D, E, F);
impl_spawn_bundle!(A, B, C, D, E, F, G);
impl_spawn_bundle!(A, B, C, D, E, F, G, H);

impl World {
    /// Create an entity with a bundle of components (tuple). Queries see
    /// the entity with its full component set at once.
    ///
    /// # Panics
    ///
    /// Panics if the bundle repeats a component type.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let e = world.spawn((Position { x: 0.0, y: 0.0 }, Velocity { x: 1.0, y: 0.0 }));
    /// ```
    pub fn spawn<B: SpawnBundle>(&mut self, bundle: B) -> Entity {
        let entity = self.create();
        if let Err(err) = bundle.attach_all(self, entity) {
            panic!("invalid spawn bundle: {err}");
        }
        let sequence = self.allocator.sequence(entity).unwrap_or_default();
        self.refresh_queries(sequence, entity, None);
        entity
    }
}

/// Strip the module path from a type name (`shapeburst::components::Shape`
/// → `Shape`). Generic arguments are kept as written:
/// `a::Wrapper<b::Inner>` → `Wrapper<b::Inner>`.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map_or(0, |i| i + 2);
    &full[start..]
}
