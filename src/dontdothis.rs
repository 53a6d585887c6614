/**!

Reinterpret array slots as values and byte slices.

Every function here trusts the caller that the pointer is a live slot of the
right element type, properly aligned, and that nothing else mutates it while
the returned reference exists. The lifetimes are made up on the spot.

*/

#[inline(always)]
pub unsafe fn slot_as_value_ref<'a, T: Sized>(slot: *const u8) -> &'a T {
    &*(slot as *const T)
}

#[inline(always)]
pub unsafe fn slot_as_value_mut<'a, T: Sized>(slot: *mut u8) -> &'a mut T {
    &mut *(slot as *mut T)
}

#[inline(always)]
pub unsafe fn slot_as_slice<'a>(slot: *const u8, element_size: usize) -> &'a [u8] {
    std::slice::from_raw_parts(slot, element_size)
}

#[inline(always)]
pub fn value_as_ptr<T: Sized>(val: &T) -> *const u8 {
    val as *const T as *const u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_reads_back_the_value_bytes() {
        let value: u32 = 0x0102_0304;
        let ptr = value_as_ptr(&value);
        let bytes = unsafe { slot_as_slice(ptr, std::mem::size_of::<u32>()) };
        assert_eq!(&value.to_ne_bytes()[..], bytes);
        assert_eq!(value, *unsafe { slot_as_value_ref::<u32>(ptr) });
    }
}
