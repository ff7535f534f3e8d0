//! Liveness cursors and the per-tick reaping scan
//!
//! Each entity kind keeps an `add` cursor (next slot to write) and a `sub`
//! cursor (oldest slot not yet known dead). The live range is the circular
//! span `[sub, add)`. `len` disambiguates the two cases where `add == sub`:
//! an empty range and a completely full one.

use serde::{Deserialize, Serialize};

use super::store::Entity;
use glam::Vec2;

/// The screen rectangle `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x < self.width && pos.y < self.height
    }

    /// Teleport a point that crossed an edge to the opposite edge
    pub fn wrap(&self, mut pos: Vec2) -> Vec2 {
        if pos.x > self.width {
            pos.x = 0.0;
        } else if pos.x < 0.0 {
            pos.x = self.width;
        }
        if pos.y > self.height {
            pos.y = 0.0;
        } else if pos.y < 0.0 {
            pos.y = self.height;
        }
        pos
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Whether an entity that dies during a scan is drawn one last time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathPolicy {
    /// Dropped from the frame on the tick it dies
    #[default]
    Cull,
    /// Moved and drawn once more on the tick it dies, then retired
    LastFrame,
}

/// Circular `[sub, add)` cursor pair over a fixed number of slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveRange {
    add: usize,
    sub: usize,
    len: usize,
    capacity: usize,
}

impl LiveRange {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "live range needs at least one slot");
        Self {
            add: 0,
            sub: 0,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub fn add(&self) -> usize {
        self.add
    }

    #[inline]
    pub fn sub(&self) -> usize {
        self.sub
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// True when the range has wrapped past the end of the slots (`add < sub`)
    pub fn is_wrapped(&self) -> bool {
        self.len > 0 && self.sub + self.len > self.capacity
    }

    /// Take the slot under `add` and advance it.
    ///
    /// Returns the slot index and whether the oldest live slot was overwritten.
    pub fn claim(&mut self) -> (usize, bool) {
        let index = self.add;
        self.add = (self.add + 1) % self.capacity;
        if self.is_full() {
            // Oldest entry is the one being overwritten; the range slides forward
            self.sub = self.add;
            (index, true)
        } else {
            self.len += 1;
            (index, false)
        }
    }

    /// Advance `sub` past the oldest slot
    pub fn retire_front(&mut self) {
        debug_assert!(self.len > 0, "retire on empty live range");
        if self.len == 0 {
            return;
        }
        self.sub = (self.sub + 1) % self.capacity;
        self.len -= 1;
    }

    /// Whether `index` lies inside the circular live range
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.capacity {
            return false;
        }
        let offset = (index + self.capacity - self.sub) % self.capacity;
        offset < self.len
    }

    /// Live indices, oldest first: `sub..capacity` then `0..add` when wrapped
    pub fn indices(&self) -> impl Iterator<Item = usize> + use<> {
        let Self {
            sub, len, capacity, ..
        } = *self;
        (0..len).map(move |k| (sub + k) % capacity)
    }
}

/// Counters from one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Slots visited (always the live range length at scan start)
    pub visited: usize,
    /// Entities handed to the visitor
    pub rendered: usize,
    /// Entities that died during this scan
    pub died: usize,
    /// Slots retired off the front of the range
    pub reaped: usize,
}

/// Advance, cull and reap every slot in the live range.
///
/// Live entities take one step and are checked against the playfield and
/// their time-to-live. A dead slot at the front of the range is retired on
/// the spot; a dead slot behind a live one stays in the range, skipped, until
/// the front catches up with it.
pub fn scan<F>(
    range: &mut LiveRange,
    slots: &mut [Entity],
    dt: f32,
    field: &Playfield,
    policy: DeathPolicy,
    mut visit: F,
) -> ScanReport
where
    F: FnMut(usize, &Entity),
{
    let mut report = ScanReport::default();
    let mut at_front = true;

    for index in range.indices() {
        report.visited += 1;
        let entity = &mut slots[index];

        if entity.is_alive() {
            entity.step(dt);
            if !entity.is_doomed(field) {
                visit(index, entity);
                report.rendered += 1;
                at_front = false;
                continue;
            }

            entity.kill();
            report.died += 1;
            if policy == DeathPolicy::LastFrame {
                visit(index, entity);
                report.rendered += 1;
            }
        }

        if at_front {
            range.retire_front();
            report.reaped += 1;
        }
    }

    if report.reaped > 0 {
        log::trace!(
            "Reaped {} slots, live range now {}..{} ({} slots)",
            report.reaped,
            range.sub(),
            range.add(),
            range.len()
        );
    }

    report
}
