use std::alloc::{self, Layout};
use std::ptr::{self, NonNull};

/// Contiguous, exclusively owned storage for `capacity` slots of one element layout.
///
/// The buffer knows nothing about which slots are live; that bookkeeping belongs to
/// `RawArray`. Every byte of the buffer is initialized: fresh slots are zero-filled
/// on allocation and on growth.
///
/// Zero-byte buffers (capacity 0 or zero-sized elements) never touch the allocator
/// and point at an aligned dangling address instead.
pub(crate) struct RawBuffer {
    ptr: NonNull<u8>,
    capacity: usize,
    element: Layout,
}

impl RawBuffer {
    /// Allocates a zero-filled buffer for `capacity` elements of `element` layout.
    ///
    /// Aborts through `handle_alloc_error` if the allocator refuses.
    pub fn allocate(capacity: usize, element: Layout) -> RawBuffer {
        debug_assert_eq!(0, element.size() % element.align(), "element layout is not padded to its alignment");
        let layout = buffer_layout(element, capacity);
        let ptr = if layout.size() == 0 {
            dangling(element)
        } else {
            let ptr = unsafe { alloc::alloc_zeroed(layout) };
            NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
        };
        trace!("allocate {} bytes for {} slots of {}", layout.size(), capacity, element.size());

        RawBuffer {
            ptr,
            capacity,
            element,
        }
    }

    /// Moves the buffer to `new_capacity` slots.
    ///
    /// Bytes of the first `min(old, new)` slots are preserved, slots past the old
    /// capacity are zero-filled.
    pub fn reallocate(&mut self, new_capacity: usize) {
        if new_capacity == self.capacity {
            return;
        }

        let old_layout = buffer_layout(self.element, self.capacity);
        let new_layout = buffer_layout(self.element, new_capacity);

        let new_ptr = match (old_layout.size(), new_layout.size()) {
            (0, 0) => self.ptr,
            (0, _) => {
                let ptr = unsafe { alloc::alloc_zeroed(new_layout) };
                NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            }
            (_, 0) => {
                unsafe { alloc::dealloc(self.ptr.as_ptr(), old_layout) };
                dangling(self.element)
            }
            (old_size, new_size) => {
                let ptr = unsafe { alloc::realloc(self.ptr.as_ptr(), old_layout, new_size) };
                let ptr = NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout));
                if new_size > old_size {
                    unsafe { ptr::write_bytes(ptr.as_ptr().add(old_size), 0, new_size - old_size) };
                }
                ptr
            }
        };

        trace!("reallocate {} -> {} bytes ({} -> {} slots)",
               old_layout.size(), new_layout.size(), self.capacity, new_capacity);

        self.ptr = new_ptr;
        self.capacity = new_capacity;
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn element(&self) -> Layout {
        self.element
    }

    /// Pointer to the start of slot `pos`. Only `pos <= capacity` is meaningful; the
    /// one-past-the-end slot may be used for offsets but never dereferenced.
    #[inline(always)]
    pub fn slot(&self, pos: usize) -> *mut u8 {
        debug_assert!(pos <= self.capacity, "slot {} past capacity {}", pos, self.capacity);
        unsafe { self.ptr.as_ptr().add(pos * self.element.size()) }
    }
}

impl Drop for RawBuffer {
    fn drop(&mut self) {
        let layout = buffer_layout(self.element, self.capacity);
        if layout.size() != 0 {
            trace!("release {} bytes", layout.size());
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

fn buffer_layout(element: Layout, capacity: usize) -> Layout {
    let size = element.size().checked_mul(capacity).expect("capacity overflow");
    Layout::from_size_align(size, element.align()).expect("capacity overflow")
}

fn dangling(element: Layout) -> NonNull<u8> {
    // Alignment is never zero, and an address equal to it is suitably aligned.
    unsafe { NonNull::new_unchecked(element.align() as *mut u8) }
}
