use crate::destructor::Destructor;
use crate::dontdothis::{slot_as_value_mut, slot_as_value_ref, value_as_ptr};
use crate::info::ArrayInfo;
use crate::raw::RawArray;
use std::alloc::Layout;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;

/// Growable array of `T` with an explicit doubling capacity policy.
///
/// Elements are stored by value in one contiguous buffer and dropped by the array when
/// they are erased, overwritten, truncated, cleared, or when the array itself is
/// dropped. `pop` hands the value back to the caller instead.
///
/// Like the byte-level `ByteArray`, this array can not be shared between threads.
pub struct Array<T> where T: Sized {
    raw: RawArray,
    _owns: PhantomData<T>,
}

// The buffer is owned outright, so the array is as thread-safe as its elements.
unsafe impl<T> Send for Array<T> where T: Send {}
unsafe impl<T> Sync for Array<T> where T: Sync {}

impl<T> Array<T> where T: Sized {
    pub fn new() -> Array<T> {
        Array {
            raw: RawArray::new(Layout::new::<T>(), Destructor::for_type::<T>()),
            _owns: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Array<T> {
        Array {
            raw: RawArray::with_capacity(capacity, Layout::new::<T>(), Destructor::for_type::<T>()),
            _owns: PhantomData,
        }
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
    pub fn element_size(&self) -> usize {
        self.raw.element_size()
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

    /// Returns a reference to the element at `pos`, panics if `pos >= len()`.
    #[track_caller]
    pub fn get(&self, pos: usize) -> &T {
        unsafe { slot_as_value_ref(self.raw.get(pos)) }
    }

    #[track_caller]
    pub fn get_mut(&mut self, pos: usize) -> &mut T {
        unsafe { slot_as_value_mut(self.raw.get(pos)) }
    }

    /// Replaces the element at `pos`, dropping the previous one.
    #[track_caller]
    pub fn set(&mut self, pos: usize, value: T) {
        let value = ManuallyDrop::new(value);
        unsafe { self.raw.set(pos, value_as_ptr(&*value)) };
    }

    #[track_caller]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.raw.swap(a, b);
    }

    pub fn as_slice(&self) -> &[T] {
        if self.is_empty() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.raw.get(0) as *const T, self.len()) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.is_empty() {
            return &mut [];
        }
        unsafe { std::slice::from_raw_parts_mut(self.raw.get(0) as *mut T, self.len()) }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Appends `value`, doubling the capacity when full.
    pub fn push(&mut self, value: T) {
        let value = ManuallyDrop::new(value);
        self.raw.push_back(value_as_ptr(&*value));
    }

    /// Inserts `value` at `pos` (`pos <= len()`), shifting later elements right.
    #[track_caller]
    pub fn insert(&mut self, pos: usize, value: T) {
        let value = ManuallyDrop::new(value);
        self.raw.insert(pos, value_as_ptr(&*value));
    }

    /// Removes the last element and returns it. Panics on an empty array.
    #[track_caller]
    pub fn pop(&mut self) -> T {
        let slot = self.raw.pop_back();
        unsafe { std::ptr::read(slot as *const T) }
    }

    /// Drops the element at `pos` and shifts later elements left.
    #[track_caller]
    pub fn erase(&mut self, pos: usize) {
        self.raw.erase(pos);
    }

    /// Erases the first element equal to `value` under `cmp`; returns whether one was found.
    pub fn remove(&mut self, value: &T, cmp: impl FnMut(&T, &T) -> Ordering) -> bool {
        self.raw.remove(value_as_ptr(value), typed::<T, _>(cmp))
    }

    pub fn linear_search(&self, value: &T, cmp: impl FnMut(&T, &T) -> Ordering) -> Option<usize> {
        self.raw.linear_search(value_as_ptr(value), typed::<T, _>(cmp))
    }

    /// Binary search; the array must already be sorted ascending under `cmp`.
    pub fn binary_search(&self, value: &T, cmp: impl FnMut(&T, &T) -> Ordering) -> Option<usize> {
        self.raw.binary_search(value_as_ptr(value), typed::<T, _>(cmp))
    }

    /// Sorts ascending under `cmp`. The order of equal elements is unspecified.
    pub fn sort(&mut self, cmp: impl FnMut(&T, &T) -> Ordering) {
        self.raw.sort(typed::<T, _>(cmp));
    }

    pub fn is_sorted(&self, cmp: impl FnMut(&T, &T) -> Ordering) -> bool {
        self.raw.is_sorted(typed::<T, _>(cmp))
    }

    pub fn reverse(&mut self) {
        self.raw.reverse();
    }

    pub fn equals(&self, other: &Array<T>, cmp: impl FnMut(&T, &T) -> Ordering) -> bool {
        self.raw.equals(&other.raw, typed::<T, _>(cmp))
    }

    /// Sets the capacity to exactly `new_capacity`, dropping elements that no longer fit.
    pub fn resize(&mut self, new_capacity: usize) {
        self.raw.resize(new_capacity);
    }

    pub fn shrink_to_fit(&mut self) {
        self.raw.shrink_to_fit();
    }

    /// Drops every element. Storage grown past the starting capacity is released.
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<T> Array<T> where T: Clone {
    /// Appends a clone of every element of `src`, in order.
    pub fn concat(&mut self, src: &Array<T>) {
        for item in src.iter() {
            self.push(item.clone());
        }
    }
}

/// Lifts a value comparator to the slot-pointer comparator the core expects.
fn typed<T, F>(mut cmp: F) -> impl FnMut(*const u8, *const u8) -> Ordering
    where F: FnMut(&T, &T) -> Ordering
{
    move |a: *const u8, b: *const u8| unsafe { cmp(slot_as_value_ref::<T>(a), slot_as_value_ref::<T>(b)) }
}

impl<T> Default for Array<T> {
    fn default() -> Array<T> {
        Array::new()
    }
}

impl<T> Clone for Array<T> where T: Clone {
    fn clone(&self) -> Array<T> {
        let mut array = Array::with_capacity(self.capacity());
        array.concat(self);
        array
    }
}

impl<T> PartialEq for Array<T> where T: PartialEq {
    fn eq(&self, other: &Array<T>) -> bool {
        self.raw.equals(&other.raw, move |a, b| unsafe {
            if slot_as_value_ref::<T>(a) == slot_as_value_ref::<T>(b) {
                Ordering::Equal
            } else {
                Ordering::Less
            }
        })
    }
}

impl<T> std::ops::Index<usize> for Array<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, pos: usize) -> &T {
        self.get(pos)
    }
}

impl<T> std::ops::IndexMut<usize> for Array<T> {
    #[track_caller]
    fn index_mut(&mut self, pos: usize) -> &mut T {
        self.get_mut(pos)
    }
}

impl<T> std::iter::FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> Array<T> {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut array = Array::with_capacity(lower.max(crate::INITIAL_CAPACITY));
        array.extend(iter);
        array
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item=T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> std::fmt::Debug for Array<T> where T: std::fmt::Debug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
