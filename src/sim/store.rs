//! Entity records laid out inside a bump arena
//!
//! A store reserves one arena sized for `capacity` records and allocates the
//! whole block once. After that, slots are handed out by the live range's
//! `add` cursor, never by the arena again. Every slot carries a generation
//! counter so a handle taken before a wraparound can tell that its slot now
//! belongs to someone else.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::arena::{Arena, ArenaError};
use super::lifecycle::{DeathPolicy, LiveRange, Playfield, ScanReport, scan};
use crate::Color;

/// Which collection an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Asteroid,
    Bullet,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Asteroid => "asteroid",
            EntityKind::Bullet => "bullet",
        }
    }
}

/// One arena slot. Plain old data so it can be viewed straight out of arena bytes.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Entity {
    pub pos: Vec2,
    /// Direction of travel (not necessarily unit length)
    pub dir: Vec2,
    pub speed: f32,
    alive: u32,
    pub color: Color,
    /// Seconds left; `INFINITY` when the entity has no time limit
    ttl: f32,
    generation: u32,
    /// Caller-chosen label
    pub tag: u32,
}

/// Every field a freshly spawned entity gets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub pos: Vec2,
    pub dir: Vec2,
    pub speed: f32,
    pub color: Color,
    pub tag: u32,
    pub ttl: Option<f32>,
}

impl Entity {
    /// Build a complete record. Slots reused after a wrap still hold their old
    /// bytes, so nothing here may rely on the slot being zeroed.
    pub fn new(params: &SpawnParams, generation: u32) -> Self {
        Self {
            pos: params.pos,
            dir: params.dir,
            speed: params.speed,
            alive: 1,
            color: params.color,
            ttl: params.ttl.unwrap_or(f32::INFINITY),
            generation,
            tag: params.tag,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive != 0
    }

    #[inline]
    pub fn kill(&mut self) {
        self.alive = 0;
    }

    pub fn ttl(&self) -> Option<f32> {
        self.ttl.is_finite().then_some(self.ttl)
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// One integration step; also burns down the time-to-live
    #[inline]
    pub fn step(&mut self, dt: f32) {
        self.pos += self.dir * self.speed * dt;
        self.ttl -= dt;
    }

    /// Dead by flag, by leaving the playfield, or by running out of time
    pub fn is_doomed(&self, field: &Playfield) -> bool {
        !self.is_alive() || !field.contains(self.pos) || self.ttl < 0.0
    }
}

/// Generation-checked reference to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Fixed-capacity array of entity records over one arena
#[derive(Debug)]
pub struct EntityStore {
    kind: EntityKind,
    arena: Arena,
    /// The single region carved out of the arena, `capacity` records long
    region: Range<usize>,
    range: LiveRange,
    spawned: u64,
}

impl EntityStore {
    pub fn new(kind: EntityKind, capacity: usize) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        let bytes = capacity
            .checked_mul(std::mem::size_of::<Entity>())
            .ok_or(ArenaError::Reservation {
                capacity: usize::MAX,
            })?;

        let mut arena = Arena::new(bytes)?;
        let region = arena.alloc(bytes)?;
        // Checked once here; later views of the same region cannot fail
        arena.view::<Entity>(region.clone())?;

        log::info!(
            "{} store: {} slots ({} bytes)",
            kind.as_str(),
            capacity,
            bytes
        );

        Ok(Self {
            kind,
            arena,
            region,
            range: LiveRange::new(capacity),
            spawned: 0,
        })
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.range.capacity()
    }

    /// Slots currently inside the live range (including skipped dead ones)
    #[inline]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    #[inline]
    pub fn range(&self) -> LiveRange {
        self.range
    }

    /// Total spawns over the store's lifetime
    #[inline]
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Raw slots, live or stale
    pub fn slots(&self) -> &[Entity] {
        bytemuck::cast_slice(&self.arena.bytes()[self.region.clone()])
    }

    /// Raw slot at `index`, whatever it currently holds
    pub fn slot(&self, index: usize) -> &Entity {
        &self.slots()[index]
    }

    /// Split borrow of the cursors and the slots
    pub(crate) fn parts_mut(&mut self) -> (&mut LiveRange, &mut [Entity]) {
        let region = self.region.clone();
        let slots = bytemuck::cast_slice_mut(&mut self.arena.bytes_mut()[region]);
        (&mut self.range, slots)
    }

    /// Write a new entity at the `add` cursor, overwriting whatever is there
    pub fn spawn(&mut self, params: SpawnParams) -> EntityHandle {
        let kind = self.kind;
        let (range, slots) = self.parts_mut();
        let (index, evicted) = range.claim();

        let slot = &mut slots[index];
        let generation = slot.generation.wrapping_add(1);
        *slot = Entity::new(&params, generation);

        self.spawned += 1;
        if evicted {
            log::trace!("{} slot {} evicted oldest live entity", kind.as_str(), index);
        }

        EntityHandle {
            index: index as u32,
            generation,
        }
    }

    /// Look up a handle; `None` once the slot died, left the range, or was reused
    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        let index = handle.index();
        if !self.range.contains(index) {
            return None;
        }
        let entity = self.slots().get(index)?;
        (entity.generation == handle.generation && entity.is_alive()).then_some(entity)
    }

    /// Mark the entity dead. Returns false for stale handles.
    pub fn kill(&mut self, handle: EntityHandle) -> bool {
        let index = handle.index();
        if !self.range.contains(index) {
            return false;
        }
        let (_, slots) = self.parts_mut();
        match slots.get_mut(index) {
            Some(entity) if entity.generation == handle.generation && entity.is_alive() => {
                entity.kill();
                true
            }
            _ => false,
        }
    }

    /// Live entities in age order, oldest first
    pub fn live(&self) -> impl Iterator<Item = (usize, &Entity)> {
        let slots = self.slots();
        self.range
            .indices()
            .map(move |i| (i, &slots[i]))
            .filter(|(_, e)| e.is_alive())
    }

    /// Number of entities in the range whose alive flag is still set
    pub fn alive_count(&self) -> usize {
        self.live().count()
    }

    /// Run the lifecycle scan over this store
    pub fn scan<F>(
        &mut self,
        dt: f32,
        field: &Playfield,
        policy: DeathPolicy,
        visit: F,
    ) -> ScanReport
    where
        F: FnMut(usize, &Entity),
    {
        let (range, slots) = self.parts_mut();
        scan(range, slots, dt, field, policy, visit)
    }
}
