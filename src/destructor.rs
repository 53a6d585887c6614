//! Per-element destruction hooks.
//!
//! A destructor receives a pointer to one element's bytes and releases whatever
//! that element owns. It must not free the slot itself, the slot belongs to the
//! array buffer.
//!
//! Typed arrays register `drop::<T>` so that the element's own `Drop` runs;
//! byte arrays may register any function with the same signature.

use crate::storage::RawBuffer;

pub type DropFn = unsafe fn(*mut u8);

#[derive(Copy, Clone)]
pub(crate) struct Destructor {
    fun: DropFn,
}

impl Destructor {
    #[inline(always)]
    pub fn new(fun: DropFn) -> Destructor {
        Destructor { fun }
    }

    /// Destructor for values of type `T`, or `None` when dropping `T` is a no-op.
    pub fn for_type<T>() -> Option<Destructor> {
        if std::mem::needs_drop::<T>() {
            Some(Destructor::new(drop::<T>))
        } else {
            None
        }
    }

    #[inline(always)]
    pub unsafe fn execute(&self, slot: *mut u8) {
        (self.fun)(slot);
    }

    /// Runs the destructor over slots `start..end` of the buffer, in index order.
    pub unsafe fn execute_range(&self, buffer: &RawBuffer, start: usize, end: usize) {
        if start < end {
            trace!("destroy {} elements", end - start);
        }
        for pos in start..end {
            self.execute(buffer.slot(pos));
        }
    }
}

#[inline(always)]
pub unsafe fn drop<T: Sized>(bytes: *mut u8) {
    std::ptr::drop_in_place(bytes as *mut T);
}
