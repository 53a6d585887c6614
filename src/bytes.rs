use crate::destructor::{Destructor, DropFn};
use crate::dontdothis::slot_as_slice;
use crate::info::ArrayInfo;
use crate::raw::RawArray;
use std::alloc::Layout;
use std::cmp::Ordering;

/// Growable array of fixed-width byte elements.
///
/// The element width is chosen at construction and never changes. Every element is
/// exactly `element_size()` bytes; inputs of any other length are rejected with a
/// panic.
///
/// The buffer is aligned only to the element layout given at construction (1 for
/// `new`), so reinterpret the bytes through unaligned reads unless you used
/// `with_layout`.
pub struct ByteArray {
    raw: RawArray,
}

impl ByteArray {
    /// Empty array of `element_size`-byte elements with the default starting capacity.
    pub fn new(element_size: usize) -> ByteArray {
        ByteArray::with_layout(byte_layout(element_size))
    }

    pub fn with_capacity(element_size: usize, capacity: usize) -> ByteArray {
        ByteArray {
            raw: RawArray::with_capacity(capacity, byte_layout(element_size), None),
        }
    }

    /// Empty array whose slots are sized and aligned for `element`.
    ///
    /// The size is rounded up to a multiple of the alignment so that every slot, not
    /// only the first, starts on an aligned address; `element_size()` reports the
    /// rounded width.
    pub fn with_layout(element: Layout) -> ByteArray {
        ByteArray {
            raw: RawArray::new(element.pad_to_align(), None),
        }
    }

    /// Empty array that runs `destructor` on each element before it is erased,
    /// overwritten, truncated, cleared or dropped. Popped elements are not
    /// destroyed; their resources pass to the caller.
    ///
    /// # Safety
    ///
    /// Every element stored in the array must be valid input to `destructor`, and
    /// the destructor must only release what the element owns, never the slot.
    /// The element size is padded to its alignment as in `with_layout`.
    pub unsafe fn with_destructor(element: Layout, destructor: DropFn) -> ByteArray {
        ByteArray {
            raw: RawArray::new(element.pad_to_align(), Some(Destructor::new(destructor))),
        }
    }

    #[inline(always)]
    pub fn element_size(&self) -> usize {
        self.raw.element_size()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.raw.is_full()
    }

    pub fn info(&self) -> ArrayInfo {
        ArrayInfo {
            element_size: self.element_size(),
            size: self.len(),
            capacity: self.capacity(),
        }
    }

    /// Bytes of the element at `pos`. Panics if `pos >= len()`.
    #[track_caller]
    pub fn get(&self, pos: usize) -> &[u8] {
        unsafe { slot_as_slice(self.raw.get(pos), self.element_size()) }
    }

    #[track_caller]
    pub fn set(&mut self, pos: usize, value: &[u8]) {
        self.check_width(value);
        unsafe { self.raw.set(pos, value.as_ptr()) };
    }

    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.raw.swap(a, b);
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item=&[u8]> + '_ {
        (0..self.len()).map(move |pos| self.get(pos))
    }

    #[track_caller]
    pub fn push_back(&mut self, value: &[u8]) {
        self.check_width(value);
        self.raw.push_back(value.as_ptr());
    }

    #[track_caller]
    pub fn insert(&mut self, pos: usize, value: &[u8]) {
        self.check_width(value);
        self.raw.insert(pos, value.as_ptr());
    }

    /// Removes the last element and returns its bytes without running the destructor.
    #[track_caller]
    pub fn pop_back(&mut self) -> &[u8] {
        let slot = self.raw.pop_back();
        unsafe { slot_as_slice(slot, self.element_size()) }
    }

    #[track_caller]
    pub fn erase(&mut self, pos: usize) {
        self.raw.erase(pos);
    }

    /// Erases the first element equal to `value` under `cmp`; returns whether one was found.
    #[track_caller]
    pub fn remove(&mut self, value: &[u8], cmp: impl FnMut(&[u8], &[u8]) -> Ordering) -> bool {
        self.check_width(value);
        let size = self.element_size();
        self.raw.remove(value.as_ptr(), slices(size, cmp))
    }

    #[track_caller]
    pub fn linear_search(&self, value: &[u8], cmp: impl FnMut(&[u8], &[u8]) -> Ordering) -> Option<usize> {
        self.check_width(value);
        self.raw.linear_search(value.as_ptr(), slices(self.element_size(), cmp))
    }

    /// Binary search; the array must already be sorted ascending under `cmp`.
    #[track_caller]
    pub fn binary_search(&self, value: &[u8], cmp: impl FnMut(&[u8], &[u8]) -> Ordering) -> Option<usize> {
        self.check_width(value);
        self.raw.binary_search(value.as_ptr(), slices(self.element_size(), cmp))
    }

    pub fn sort(&mut self, cmp: impl FnMut(&[u8], &[u8]) -> Ordering) {
        let size = self.element_size();
        self.raw.sort(slices(size, cmp));
    }

    pub fn is_sorted(&self, cmp: impl FnMut(&[u8], &[u8]) -> Ordering) -> bool {
        self.raw.is_sorted(slices(self.element_size(), cmp))
    }

    pub fn reverse(&mut self) {
        self.raw.reverse();
    }

    /// Appends a copy of every element of `src`.
    ///
    /// Panics if the element sizes differ, or if `src` owns resources through a
    /// destructor: copying such bytes would free those resources twice.
    #[track_caller]
    pub fn concat(&mut self, src: &ByteArray) {
        assert!(!src.raw.has_destructor(), "concat of a byte array whose elements own resources");
        self.raw.concat(&src.raw);
    }

    pub fn equals(&self, other: &ByteArray, cmp: impl FnMut(&[u8], &[u8]) -> Ordering) -> bool {
        self.element_size() == other.element_size()
            && self.raw.equals(&other.raw, slices(self.element_size(), cmp))
    }

    pub fn resize(&mut self, new_capacity: usize) {
        self.raw.resize(new_capacity);
    }

    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    #[track_caller]
    fn check_width(&self, value: &[u8]) {
        assert_eq!(self.element_size(), value.len(), "element width mismatch");
    }
}

impl std::fmt::Debug for ByteArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

fn byte_layout(element_size: usize) -> Layout {
    Layout::from_size_align(element_size, 1).expect("element size overflow")
}

/// Lifts a byte-slice comparator to the slot-pointer comparator the core expects.
fn slices<F>(element_size: usize, mut cmp: F) -> impl FnMut(*const u8, *const u8) -> Ordering
    where F: FnMut(&[u8], &[u8]) -> Ordering
{
    move |a: *const u8, b: *const u8| unsafe { cmp(slot_as_slice(a, element_size), slot_as_slice(b, element_size)) }
}
