//! When and how the backing buffer changes size.
//!
//! Growth doubles the capacity, which keeps `push_back` amortized O(1): across n
//! pushes the bytes copied by reallocation sum to less than 2n elements. Nothing
//! ever shrinks implicitly except `clear`, which hands an array that has grown
//! past the starting capacity back to it.

use crate::raw::RawArray;

pub const GROWTH_FACTOR: usize = 2;
pub const INITIAL_CAPACITY: usize = 4;

/// Capacity after one growth step from `capacity`.
#[inline]
pub(crate) fn grown_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        INITIAL_CAPACITY
    } else {
        capacity.checked_mul(GROWTH_FACTOR).expect("capacity overflow")
    }
}

impl RawArray {
    /// Makes sure one more element fits, doubling the buffer when it is full.
    pub fn ensure_room_for_one(&mut self) {
        if self.is_full() {
            let old_capacity = self.capacity();
            let new_capacity = grown_capacity(old_capacity);
            debug!("grow {} -> {} slots", old_capacity, new_capacity);
            self.buffer.reallocate(new_capacity);
        }
    }

    /// Sets the capacity to exactly `new_capacity` slots.
    ///
    /// Elements that no longer fit are destroyed and the size is cut down to the new
    /// capacity.
    pub fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        if new_capacity == old_capacity {
            return;
        }
        if new_capacity < self.len {
            debug!("truncate {} -> {} elements on shrink", self.len, new_capacity);
            self.truncate(new_capacity);
        }
        debug!("resize {} -> {} slots", old_capacity, new_capacity);
        self.buffer.reallocate(new_capacity);
    }

    pub fn shrink_to_fit(&mut self) {
        if self.len != self.capacity() {
            debug!("shrink to fit {} elements", self.len);
            self.resize(self.len);
        }
    }

    /// Destroys every element; an array that grew past `INITIAL_CAPACITY` also
    /// gives the extra storage back.
    pub fn clear(&mut self) {
        self.truncate(0);
        if self.capacity() > INITIAL_CAPACITY {
            debug!("clear releases {} -> {} slots", self.capacity(), INITIAL_CAPACITY);
            self.buffer.reallocate(INITIAL_CAPACITY);
        }
    }
}
