//! Bounded pool of phone-number ids.
//!
//! Ids come from `[0, capacity)`. The pool hands out released ids first (least
//! first) and only then advances the high-water mark, so ids stay dense near
//! zero under churn.
//!
//! ```text
//!   0                 high_water             capacity
//!   |--- outstanding / released ---|---- never issued ----|
//! ```
//!
//! An id is available iff it is released or at/above the high-water mark.

use log::debug;

use crate::error::{Error, Result};
use crate::released::ReleasedSet;

/// Largest capacity whose ids all fit the `i32` sentinel surface.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Returned by [`PhoneDirectory::get`] when no id is available.
pub const EXHAUSTED: i32 = -1;

/// A phone directory handing out distinct ids from `[0, capacity)`.
///
/// ```rust
/// use memds::PhoneDirectory;
///
/// let mut dir = PhoneDirectory::new(2);
/// assert_eq!(dir.get(), 0);
/// assert_eq!(dir.get(), 1);
/// assert_eq!(dir.get(), -1);
/// dir.release(0);
/// assert!(dir.check(0));
/// assert_eq!(dir.get(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct PhoneDirectory {
    capacity: u32,
    /// Smallest id never issued by a fresh allocation.
    high_water: u32,
    released: ReleasedSet,
}

impl PhoneDirectory {
    /// # Panics
    ///
    /// Panics if `max_numbers` exceeds [`MAX_CAPACITY`].
    pub fn new(max_numbers: usize) -> Self {
        Self::try_new(max_numbers).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(max_numbers: usize) -> Result<Self> {
        if max_numbers > MAX_CAPACITY {
            return Err(Error::CapacityTooLarge {
                requested: max_numbers,
                max: MAX_CAPACITY,
            });
        }
        Ok(Self {
            capacity: max_numbers as u32,
            high_water: 0,
            released: ReleasedSet::new(),
        })
    }

    /// Hands out an id: the least released one if any, else the next fresh one.
    pub fn allocate(&mut self) -> Option<u32> {
        if let Some(id) = self.released.pop_first() {
            return Some(id);
        }
        if self.high_water < self.capacity {
            let id = self.high_water;
            self.high_water += 1;
            return Some(id);
        }
        debug!("phone directory of {} exhausted", self.capacity);
        None
    }

    /// Whether `id` can be handed out by a future allocation.
    #[inline]
    pub fn is_available(&self, id: u32) -> bool {
        if id >= self.capacity {
            return false;
        }
        id >= self.high_water || self.released.contains(id)
    }

    /// Makes an outstanding `id` available again. Returns `false` (and changes
    /// nothing) if the id was already available or out of range.
    pub fn free(&mut self, id: u32) -> bool {
        if id >= self.capacity {
            debug!("ignoring release of {id}: outside [0, {})", self.capacity);
            return false;
        }
        if self.is_available(id) {
            return false;
        }
        self.released.insert(id)
    }

    /// Allocates an id, or returns [`EXHAUSTED`] (`-1`).
    pub fn get(&mut self) -> i32 {
        // Capacity is bounded by `MAX_CAPACITY`, so every id fits.
        self.allocate().map_or(EXHAUSTED, |id| id as i32)
    }

    /// Whether `number` is available. Out-of-range numbers never are.
    pub fn check(&self, number: i32) -> bool {
        u32::try_from(number).is_ok_and(|id| self.is_available(id))
    }

    /// Releases `number` if it is outstanding; otherwise does nothing.
    pub fn release(&mut self, number: i32) {
        match u32::try_from(number) {
            Ok(id) => {
                self.free(id);
            }
            Err(_) => debug!("ignoring release of negative number {number}"),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    pub fn high_water_mark(&self) -> usize {
        self.high_water as usize
    }

    /// Number of ids currently handed out.
    pub fn outstanding(&self) -> usize {
        self.high_water as usize - self.released.len()
    }

    /// Number of ids a future allocation could return.
    pub fn available(&self) -> usize {
        self.capacity() - self.outstanding()
    }

    pub fn is_exhausted(&self) -> bool {
        self.available() == 0
    }

    /// Released ids waiting to be reissued, ascending.
    pub fn released(&self) -> impl Iterator<Item = u32> + '_ {
        self.released.iter()
    }

    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.released.memory_usage()
    }
}
