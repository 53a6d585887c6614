//! Insertion, removal, search, ordering and comparison over a `RawArray`.
//!
//! Everything here goes through the element operations and the capacity policy;
//! the only direct buffer access is the block move that shifts a tail of elements
//! by one slot. Comparators get pointers to two element slots and follow the
//! usual contract: `Less` when the first orders before the second.

use crate::raw::RawArray;
use std::cmp::Ordering;
use std::ptr;

impl RawArray {
    /// Appends a byte copy of `src`. Amortized O(1).
    pub fn push_back(&mut self, src: *const u8) {
        self.ensure_room_for_one();
        let pos = self.len;
        unsafe { self.write(pos, src) };
        self.len += 1;
    }

    /// Inserts a byte copy of `src` at `pos`, moving `pos..len` one slot right.
    /// `pos == len` appends.
    #[track_caller]
    pub fn insert(&mut self, pos: usize, src: *const u8) {
        assert!(pos <= self.len, "insert position {} is past the end of array of size {}", pos, self.len);
        self.ensure_room_for_one();
        let tail = self.len - pos;
        if tail > 0 {
            // overlapping move, copies the last element first
            unsafe { ptr::copy(self.buffer.slot(pos), self.buffer.slot(pos + 1), tail * self.element_size()) };
        }
        unsafe { self.write(pos, src) };
        self.len += 1;
    }

    /// Removes the last element without destroying it and returns its slot.
    ///
    /// The caller takes ownership of the bytes; the slot stays readable until the
    /// next mutation of the array.
    #[track_caller]
    pub fn pop_back(&mut self) -> *mut u8 {
        assert!(!self.is_empty(), "pop_back on an empty array");
        self.len -= 1;
        self.buffer.slot(self.len)
    }

    /// Destroys the element at `pos` and closes the gap.
    #[track_caller]
    pub fn erase(&mut self, pos: usize) {
        assert!(pos < self.len, "erase index {} out of bounds for array of size {}", pos, self.len);
        let len = self.len;
        if let Some(destructor) = self.destructor {
            self.len = pos;
            unsafe { destructor.execute(self.buffer.slot(pos)) };
        }
        let tail = len - pos - 1;
        if tail > 0 {
            unsafe { ptr::copy(self.buffer.slot(pos + 1), self.buffer.slot(pos), tail * self.element_size()) };
        }
        self.len = len - 1;
    }

    /// Erases the first element equal to `value`. Returns whether one was found.
    pub fn remove(&mut self, value: *const u8, cmp: impl FnMut(*const u8, *const u8) -> Ordering) -> bool {
        match self.linear_search(value, cmp) {
            Some(pos) => {
                self.erase(pos);
                true
            }
            None => false,
        }
    }

    pub fn linear_search(&self, value: *const u8, mut cmp: impl FnMut(*const u8, *const u8) -> Ordering) -> Option<usize> {
        (0..self.len).find(|&pos| cmp(self.buffer.slot(pos), value) == Ordering::Equal)
    }

    /// Binary search over an array sorted ascending under `cmp`. On an unsorted
    /// array the result is unspecified but the call is still memory safe.
    pub fn binary_search(&self, value: *const u8, mut cmp: impl FnMut(*const u8, *const u8) -> Ordering) -> Option<usize> {
        let mut low = 0;
        let mut high = self.len;
        while low < high {
            let mid = low + (high - low) / 2;
            match cmp(self.buffer.slot(mid), value) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return Some(mid),
            }
        }
        None
    }

    /// Selection sort. Not stable.
    pub fn sort(&mut self, mut cmp: impl FnMut(*const u8, *const u8) -> Ordering) {
        for i in 0..self.len {
            let mut min = i;
            for j in i + 1..self.len {
                if cmp(self.buffer.slot(j), self.buffer.slot(min)) == Ordering::Less {
                    min = j;
                }
            }
            self.swap(i, min);
        }
    }

    pub fn reverse(&mut self) {
        let len = self.len;
        for i in 0..len / 2 {
            self.swap(i, len - 1 - i);
        }
    }

    /// Appends a byte copy of every element of `src`, in order.
    #[track_caller]
    pub fn concat(&mut self, src: &RawArray) {
        assert_eq!(self.element_size(), src.element_size(), "concat of arrays with different element sizes");
        for pos in 0..src.len {
            self.push_back(src.buffer.slot(pos));
        }
    }

    pub fn equals(&self, other: &RawArray, mut cmp: impl FnMut(*const u8, *const u8) -> Ordering) -> bool {
        self.len == other.len
            && (0..self.len).all(|pos| cmp(self.buffer.slot(pos), other.buffer.slot(pos)) == Ordering::Equal)
    }

    pub fn is_sorted(&self, mut cmp: impl FnMut(*const u8, *const u8) -> Ordering) -> bool {
        (1..self.len).all(|pos| cmp(self.buffer.slot(pos - 1), self.buffer.slot(pos)) != Ordering::Greater)
    }
}
