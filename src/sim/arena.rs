//! Fixed-capacity bump arena with wraparound reuse
//!
//! One block is reserved up front and never grows. Allocation bumps a cursor;
//! when a request would run past the end the cursor jumps back to zero and the
//! old bytes are handed out again as-is. Nothing is freed individually.

use std::ops::Range;

use bytemuck::Pod;
use thiserror::Error;

/// Backing words are 8-byte aligned so typed views of `f32`/`u32` records cast cleanly.
type Word = u64;
const WORD_BYTES: usize = std::mem::size_of::<Word>();

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena capacity must be non-zero")]
    ZeroCapacity,
    #[error("could not reserve {capacity} bytes for arena")]
    Reservation { capacity: usize },
    #[error("allocation of {size} bytes exceeds arena capacity of {capacity} bytes")]
    Oversized { size: usize, capacity: usize },
    #[error("arena has been destroyed")]
    Destroyed,
    #[error("region {start}..{end} cannot be viewed as records of {record_size} bytes")]
    Misaligned {
        start: usize,
        end: usize,
        record_size: usize,
    },
}

/// Linear allocator over a single pre-reserved block
#[derive(Debug)]
pub struct Arena {
    memory: Vec<Word>,
    /// Usable bytes (may be less than `memory.len() * 8`)
    capacity: usize,
    /// Next free byte offset, always `<= capacity`
    cursor: usize,
    /// Number of times the cursor wrapped back to zero
    laps: u64,
}

impl Arena {
    /// Reserve a zero-initialized block of `capacity` bytes
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }

        let words = capacity.div_ceil(WORD_BYTES);
        let mut memory = Vec::new();
        memory
            .try_reserve_exact(words)
            .map_err(|_| ArenaError::Reservation { capacity })?;
        memory.resize(words, 0);

        log::debug!("Arena reserved {} bytes", capacity);
        Ok(Self {
            memory,
            capacity,
            cursor: 0,
            laps: 0,
        })
    }

    /// Bump-allocate `size` bytes, wrapping to offset zero on overflow.
    ///
    /// The returned range may cover bytes from an earlier lap; they are not cleared.
    pub fn alloc(&mut self, size: usize) -> Result<Range<usize>, ArenaError> {
        if self.is_destroyed() {
            return Err(ArenaError::Destroyed);
        }
        if size > self.capacity {
            return Err(ArenaError::Oversized {
                size,
                capacity: self.capacity,
            });
        }

        if self.cursor + size > self.capacity {
            self.cursor = 0;
            self.laps += 1;
            log::debug!("Arena wrapped (lap {})", self.laps);
        }

        let start = self.cursor;
        self.cursor += size;
        Ok(start..self.cursor)
    }

    /// Release the block. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        log::debug!("Arena released {} bytes", self.capacity);
        self.memory = Vec::new();
        self.capacity = 0;
        self.cursor = 0;
    }

    pub fn is_destroyed(&self) -> bool {
        self.capacity == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn laps(&self) -> u64 {
        self.laps
    }

    pub fn bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<Word, u8>(&self.memory)[..self.capacity]
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let capacity = self.capacity;
        &mut bytemuck::cast_slice_mut::<Word, u8>(&mut self.memory)[..capacity]
    }

    /// View an allocated region as a slice of records
    pub fn view<T: Pod>(&self, region: Range<usize>) -> Result<&[T], ArenaError> {
        let err = misaligned::<T>(&region);
        let bytes = self.bytes().get(region).ok_or(err.clone())?;
        bytemuck::try_cast_slice(bytes).map_err(|_| err)
    }

    /// Mutable view of an allocated region as a slice of records
    pub fn view_mut<T: Pod>(&mut self, region: Range<usize>) -> Result<&mut [T], ArenaError> {
        let err = misaligned::<T>(&region);
        let bytes = self.bytes_mut().get_mut(region).ok_or(err.clone())?;
        bytemuck::try_cast_slice_mut(bytes).map_err(|_| err)
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn misaligned<T>(region: &Range<usize>) -> ArenaError {
    ArenaError::Misaligned {
        start: region.start,
        end: region.end,
        record_size: std::mem::size_of::<T>(),
    }
}
