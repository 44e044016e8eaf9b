use std::alloc::{self, Layout};
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::ArrayError;

/// An owned block of `capacity` uninitialized slots.
///
/// The buffer only manages memory. Which slots hold live values is tracked by the owner, and
/// dropping the buffer releases the block without running any element destructors.
pub(crate) struct RawBuffer<T> {
    data: *mut T,
    capacity: usize,
}

impl<T> RawBuffer<T> {
    pub fn new() -> Self {
        Self {
            data: ptr::null_mut(),
            capacity: 0,
        }
    }

    pub fn allocate(capacity: usize) -> Result<Self, ArrayError> {
        if capacity == 0 {
            return Ok(Self::new());
        }
        let layout = Self::layout(capacity)?;
        let data = if layout.size() == 0 {
            NonNull::<T>::dangling().as_ptr()
        } else {
            // SAFETY: layout has a non-zero size.
            let data = unsafe { alloc::alloc(layout) as *mut T };
            if data.is_null() {
                alloc::handle_alloc_error(layout);
            }
            data
        };
        Ok(Self { data, capacity })
    }

    fn layout(capacity: usize) -> Result<Layout, ArrayError> {
        Layout::array::<T>(capacity).map_err(|_| ArrayError::CapacityOverflow {
            requested: capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_ptr(&self) -> *const T {
        self.data
    }

    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.data
    }

    /// Moves the first `live` slots into a fresh block of `new_capacity` slots and adopts it.
    ///
    /// # Safety
    ///
    /// The first `live` slots must be initialized, and `live` must not exceed either capacity.
    pub unsafe fn relocate(&mut self, new_capacity: usize, live: usize) -> Result<(), ArrayError> {
        debug_assert!(live <= self.capacity && live <= new_capacity);

        let mut fresh = Self::allocate(new_capacity)?;
        if live > 0 {
            ptr::copy_nonoverlapping(self.data, fresh.data, live);
        }
        log::trace!(
            "relocated {} elements from {} to {} slots",
            live,
            self.capacity,
            new_capacity
        );

        // `fresh` now holds the old block. Its values were moved out, so dropping it only frees.
        mem::swap(self, &mut fresh);
        Ok(())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.data.is_null() {
            return;
        }
        if let Ok(layout) = Self::layout(self.capacity) {
            if layout.size() != 0 {
                // SAFETY: data was allocated with exactly this layout in `allocate`.
                unsafe { alloc::dealloc(self.data as *mut u8, layout) };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_is_null() {
        let buf: RawBuffer<u32> = RawBuffer::new();
        assert!(buf.as_ptr().is_null());
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zero_capacity_allocation_stays_null() {
        let buf: RawBuffer<u32> = RawBuffer::allocate(0).unwrap();
        assert!(buf.as_ptr().is_null());
    }

    #[test]
    fn allocation_has_exact_capacity() {
        let buf: RawBuffer<u64> = RawBuffer::allocate(7).unwrap();
        assert!(!buf.as_ptr().is_null());
        assert_eq!(buf.capacity(), 7);
    }

    #[test]
    fn zero_sized_elements_get_non_null_pointer() {
        let buf: RawBuffer<()> = RawBuffer::allocate(3).unwrap();
        assert!(!buf.as_ptr().is_null());
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn oversized_allocation_reports_overflow() {
        let result = RawBuffer::<u64>::allocate(usize::MAX);
        assert!(matches!(
            result,
            Err(ArrayError::CapacityOverflow { requested: usize::MAX })
        ));
    }

    #[test]
    fn relocate_moves_live_slots() {
        let mut buf: RawBuffer<String> = RawBuffer::allocate(2).unwrap();
        unsafe {
            ptr::write(buf.as_mut_ptr(), "a".to_string());
            ptr::write(buf.as_mut_ptr().add(1), "b".to_string());
            buf.relocate(8, 2).unwrap();
        }
        assert_eq!(buf.capacity(), 8);
        unsafe {
            assert_eq!(ptr::read(buf.as_ptr()), "a");
            assert_eq!(ptr::read(buf.as_ptr().add(1)), "b");
        }
    }

    #[test]
    fn relocate_from_empty() {
        let mut buf: RawBuffer<i32> = RawBuffer::new();
        unsafe { buf.relocate(2, 0).unwrap() };
        assert_eq!(buf.capacity(), 2);
        assert!(!buf.as_ptr().is_null());
    }
}
