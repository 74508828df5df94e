//! # Lifecycle — Bursts and Expiry
//!
//! A click spawns a burst of entities; each one is visible for a random
//! time and then expires. Expiries live in a min-heap keyed by due time and
//! are applied at the start of every frame, before any system runs:
//!
//! ```text
//! click(x, y) at t ─┬─ spawn N × (Position, Velocity, Shape, Renderable)
//!                   └─ push (t + lifetime_i, seq, entity_i) into the heap
//!
//! frame(elapsed) ──── pop every entry with due <= elapsed, in (due, seq)
//!                     order, and apply the ExpireAction
//! ```
//!
//! Applying an expiry never fails. If the entity is already gone, or its
//! `Renderable` was already removed, the entry is dropped and logged.
//!
//! ## Randomness
//!
//! All random draws go through [`Sampler`], one uniform value in `[0, 1)`
//! per call, five calls per entity in a fixed order: x velocity, y
//! velocity, primitive, size, lifetime. Tests script the values with
//! [`ScriptedSampler`]; the simulation uses [`RandSampler`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::{Position, Renderable, Shape, Velocity};
use crate::config::{ExpireAction, SimConfig};
use crate::ecs::{Entity, World};
use crate::math::Vec2;

// ── Sampling ─────────────────────────────────────────────────────────────

/// Source of uniform random numbers in `[0, 1)`.
pub trait Sampler {
    fn next_unit(&mut self) -> f32;
}

/// [`Sampler`] backed by `rand`'s `StdRng`.
pub struct RandSampler {
    rng: StdRng,
}

impl RandSampler {
    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// [`seeded`](Self::seeded) if a seed is given, else
    /// [`from_entropy`](Self::from_entropy).
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Sampler for RandSampler {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of values, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSampler {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: &[f32]) -> Self {
        assert!(!values.is_empty(), "ScriptedSampler needs at least one value");
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }
}

impl Sampler for ScriptedSampler {
    fn next_unit(&mut self) -> f32 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

// ── Expiry queue ─────────────────────────────────────────────────────────

/// A due expiry popped from the queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expiry {
    /// Milliseconds, on the same clock as frame `elapsed`.
    pub due: f64,
    pub entity: Entity,
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    due: f64,
    /// Scheduling order, breaks ties between equal due times.
    seq: u64,
    entity: Entity,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .total_cmp(&other.due)
            .then(self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending expiries.
#[derive(Debug, Default)]
pub struct ExpiryQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl ExpiryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, entity: Entity, due: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled { due, seq, entity }));
    }

    /// Pop the earliest entry if it is due at `now`.
    pub fn pop_due(&mut self, now: f64) -> Option<Expiry> {
        let Reverse(next) = self.heap.peek()?;
        if next.due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(s)| Expiry {
            due: s.due,
            entity: s.entity,
        })
    }

    /// Drop every pending entry for `entity`. Returns how many were dropped.
    pub fn cancel(&mut self, entity: Entity) -> usize {
        let before = self.heap.len();
        self.heap.retain(|Reverse(s)| s.entity != entity);
        before - self.heap.len()
    }

    /// Due time of the earliest entry.
    pub fn next_due(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(s)| s.due)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

// ── Manager ──────────────────────────────────────────────────────────────

/// What one [`LifecycleManager::drain_due`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// `Renderable` detached, entity kept.
    pub hidden: usize,
    /// `Renderable` detached and entity destroyed.
    pub despawned: usize,
    /// Entity already gone or already hidden.
    pub skipped: usize,
}

/// Spawns bursts and applies expiries.
pub struct LifecycleManager {
    batch_size: usize,
    speed: f32,
    half_size: f32,
    max_lifetime: f32,
    action: ExpireAction,
    sampler: Box<dyn Sampler>,
    queue: ExpiryQueue,
}

impl LifecycleManager {
    pub fn new(config: &SimConfig, sampler: Box<dyn Sampler>) -> Self {
        Self {
            batch_size: config.batch_size,
            speed: config.speed,
            half_size: config.half_size(),
            max_lifetime: config.max_lifetime,
            action: config.expire_action,
            sampler,
            queue: ExpiryQueue::new(),
        }
    }

    /// Spawn one burst at `at` and schedule each entity's expiry relative
    /// to `now`. Returns the new entities in creation order.
    pub fn spawn_burst(&mut self, world: &mut World, at: Vec2, now: f64) -> Vec<Entity> {
        let mut spawned = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            let velocity = Velocity::new(self.signed_speed(), self.signed_speed());
            let is_circle = self.sampler.next_unit() >= 0.5;
            let size = self.half_size - self.half_size * self.sampler.next_unit();
            let shape = if is_circle {
                Shape::Circle { radius: size }
            } else {
                Shape::Box { side: size }
            };
            let lifetime = self.max_lifetime - self.max_lifetime * self.sampler.next_unit();

            let entity = world.spawn((Position::from(at), velocity, shape, Renderable));
            self.queue.schedule(entity, now + lifetime as f64);
            spawned.push(entity);
        }
        log::debug!(
            "burst of {} at ({:.1}, {:.1}), {} expiries pending",
            spawned.len(),
            at.x,
            at.y,
            self.queue.len()
        );
        spawned
    }

    fn signed_speed(&mut self) -> f32 {
        self.speed * (2.0 * self.sampler.next_unit() - 1.0)
    }

    /// Apply every expiry due at `now`, earliest first.
    pub fn drain_due(&mut self, world: &mut World, now: f64) -> DrainReport {
        let mut report = DrainReport::default();
        while let Some(expiry) = self.queue.pop_due(now) {
            let entity = expiry.entity;
            if let Err(err) = world.detach::<Renderable>(entity) {
                log::debug!("expiry at {:.0} ms skipped: {err}", expiry.due);
                report.skipped += 1;
                continue;
            }
            match self.action {
                ExpireAction::Hide => report.hidden += 1,
                ExpireAction::Despawn => match world.destroy(entity) {
                    Ok(()) => report.despawned += 1,
                    Err(err) => {
                        log::warn!("expired entity could not be destroyed: {err}");
                        report.skipped += 1;
                    }
                },
            }
        }
        report
    }

    /// Forget pending expiries for `entity`.
    pub fn cancel(&mut self, entity: Entity) -> usize {
        self.queue.cancel(entity)
    }

    /// Number of scheduled expiries not yet applied.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.queue.next_due()
    }

    pub fn expire_action(&self) -> ExpireAction {
        self.action
    }
}
