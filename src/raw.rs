use crate::capacity::INITIAL_CAPACITY;
use crate::destructor::Destructor;
use crate::storage::RawBuffer;
use std::alloc::Layout;
use std::ptr;

/// Type-erased growable array core shared by `ByteArray` and `Array<T>`.
///
/// Slots `0..len` hold live elements; slots `len..capacity` hold bytes that must not
/// be interpreted as elements. Elements are moved around with raw byte copies, so
/// element types must be relocatable by `memcpy`.
///
/// Capacity policy lives in `capacity.rs`, the algorithms in `algorithms.rs`.
pub(crate) struct RawArray {
    pub(crate) buffer: RawBuffer,
    pub(crate) len: usize,
    pub(crate) destructor: Option<Destructor>,
}

impl RawArray {
    pub fn new(element: Layout, destructor: Option<Destructor>) -> RawArray {
        RawArray::with_capacity(INITIAL_CAPACITY, element, destructor)
    }

    pub fn with_capacity(capacity: usize, element: Layout, destructor: Option<Destructor>) -> RawArray {
        RawArray {
            buffer: RawBuffer::allocate(capacity, element),
            len: 0,
            destructor,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[inline(always)]
    pub fn element_size(&self) -> usize {
        self.buffer.element().size()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[inline(always)]
    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// Pointer to the live element at `pos`.
    #[track_caller]
    #[inline]
    pub fn get(&self, pos: usize) -> *mut u8 {
        assert!(pos < self.len, "index {} out of bounds for array of size {}", pos, self.len);
        self.buffer.slot(pos)
    }

    /// Replaces the element at `pos` with a byte copy of `src`, destroying the old one.
    ///
    /// `src` must point at `element_size` readable bytes outside of this buffer, and
    /// ownership of what they describe passes to the array.
    #[track_caller]
    pub unsafe fn set(&mut self, pos: usize, src: *const u8) {
        let slot = self.get(pos);
        if let Some(destructor) = self.destructor {
            // while the old value is being destroyed, it and everything after it is not live
            let len = self.len;
            self.len = pos;
            destructor.execute(slot);
            self.len = len;
        }
        self.write(pos, src);
    }

    /// Byte-for-byte exchange of two live elements.
    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        let slot_a = self.get(a);
        let slot_b = self.get(b);
        if a != b {
            unsafe { ptr::swap_nonoverlapping(slot_a, slot_b, self.element_size()) };
        }
    }

    /// Copies `src` into slot `pos` without any bookkeeping. `pos < capacity`.
    #[inline(always)]
    pub(crate) unsafe fn write(&mut self, pos: usize, src: *const u8) {
        debug_assert!(pos < self.capacity());
        ptr::copy_nonoverlapping(src, self.buffer.slot(pos), self.element_size());
    }

    /// Drops the live elements at `new_len..len` and makes `new_len` the size.
    pub(crate) fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let old_len = self.len;
        self.len = new_len;
        if let Some(destructor) = self.destructor {
            unsafe { destructor.execute_range(&self.buffer, new_len, old_len) };
        }
    }
}

impl Drop for RawArray {
    fn drop(&mut self) {
        self.truncate(0);
        // buffer is released by its own drop
    }
}
