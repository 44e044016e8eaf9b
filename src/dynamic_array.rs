use std::fmt;
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use crate::cursor::Cursor;
use crate::error::ArrayError;
use crate::growth;
use crate::raw::RawBuffer;

/// A growable, contiguous sequence of `T`.
///
/// Slots `[0, size)` of the backing block hold live values; slots `[size, capacity)` are
/// allocated but empty. Positions are handed out as [`Cursor`]s, which are offsets and so stay
/// meaningful across reallocation. Operations that may reallocate (`reserve`, `push_back`,
/// `insert`, `resize`) still invalidate any references or slice iterators borrowed from the
/// array, which the borrow checker enforces.
pub struct DynamicArray<T> {
    buf: RawBuffer<T>,
    size: usize,
}

impl<T> DynamicArray<T> {
    pub fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            size: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut arr = Self::new();
        arr.reserve(capacity);
        arr
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn as_slice(&self) -> &[T] {
        if self.size == 0 {
            &[]
        } else {
            // SAFETY: the first `size` slots are initialized and the block is non-null.
            unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.size) }
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        if self.size == 0 {
            &mut []
        } else {
            // SAFETY: as above, and `&mut self` guarantees exclusive access.
            unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.size) }
        }
    }

    pub fn at(&self, index: usize) -> Result<&T, ArrayError> {
        let len = self.size;
        self.as_slice()
            .get(index)
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ArrayError> {
        let len = self.size;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(ArrayError::IndexOutOfRange { index, len })
    }

    pub fn at_cursor(&self, position: Cursor) -> Result<&T, ArrayError> {
        let (offset, len) = (position.offset(), self.size);
        self.as_slice()
            .get(offset)
            .ok_or(ArrayError::CursorOutOfRange { offset, len })
    }

    pub fn at_cursor_mut(&mut self, position: Cursor) -> Result<&mut T, ArrayError> {
        let (offset, len) = (position.offset(), self.size);
        self.as_mut_slice()
            .get_mut(offset)
            .ok_or(ArrayError::CursorOutOfRange { offset, len })
    }

    pub fn begin(&self) -> Cursor {
        Cursor::from_offset(0)
    }

    /// One past the last live element, not the end of the allocated block.
    pub fn end(&self) -> Cursor {
        Cursor::from_offset(self.size)
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Grows the block to exactly `new_cap` slots. Never shrinks.
    pub fn try_reserve(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        if new_cap <= self.capacity() {
            return Ok(());
        }
        // SAFETY: the first `size` slots are live and `size <= capacity < new_cap`.
        unsafe { self.buf.relocate(new_cap, self.size) }
    }

    /// Like [`try_reserve`](Self::try_reserve), but panics if `new_cap` slots cannot be laid out.
    pub fn reserve(&mut self, new_cap: usize) {
        if let Err(err) = self.try_reserve(new_cap) {
            panic!("{err}");
        }
    }

    fn grow(&mut self) {
        self.reserve(growth::next_capacity(self.capacity()));
    }

    pub fn push_back(&mut self, value: T) {
        if self.size == self.capacity() {
            self.grow();
        }
        // SAFETY: size < capacity after growing, so the slot is allocated and empty.
        unsafe {
            ptr::write(self.buf.as_mut_ptr().add(self.size), value);
        }
        self.size += 1;
    }

    pub fn pop_back(&mut self) -> Result<T, ArrayError> {
        if self.size == 0 {
            return Err(ArrayError::Empty);
        }
        self.size -= 1;
        // SAFETY: the slot at the old `size - 1` is live, and is now outside the live range.
        unsafe { Ok(ptr::read(self.buf.as_ptr().add(self.size))) }
    }

    /// Inserts `value` before `position`, which may be anywhere in `[begin(), end()]`.
    ///
    /// Returns a cursor to the inserted element.
    pub fn insert(&mut self, position: Cursor, value: T) -> Result<Cursor, ArrayError> {
        let offset = position.offset();
        if offset > self.size {
            return Err(ArrayError::CursorOutOfRange {
                offset,
                len: self.size,
            });
        }

        if self.size == self.capacity() {
            self.grow();
        }

        // SAFETY: offset <= size < capacity. The tail `[offset, size)` moves one slot right into
        // allocated space, leaving `offset` vacant for the new value.
        unsafe {
            let slot = self.buf.as_mut_ptr().add(offset);
            ptr::copy(slot, slot.add(1), self.size - offset);
            ptr::write(slot, value);
        }
        self.size += 1;
        Ok(Cursor::from_offset(offset))
    }

    /// Removes the element at `position`, which must lie in `[begin(), end())`.
    ///
    /// Returns a cursor to the element that followed it, or `end()` if it was the last one.
    pub fn erase(&mut self, position: Cursor) -> Result<Cursor, ArrayError> {
        if self.size == 0 {
            return Err(ArrayError::Empty);
        }
        let offset = position.offset();
        if offset >= self.size {
            return Err(ArrayError::CursorOutOfRange {
                offset,
                len: self.size,
            });
        }

        // SAFETY: offset < size, so the slot is live. The tail closes the gap before the removed
        // value is dropped, keeping the array consistent if its destructor panics.
        let removed = unsafe {
            let slot = self.buf.as_mut_ptr().add(offset);
            let removed = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.size - offset - 1);
            removed
        };
        self.size -= 1;
        drop(removed);

        Ok(Cursor::from_offset(offset))
    }

    fn truncate(&mut self, len: usize) {
        if len >= self.size {
            return;
        }
        // SAFETY: `[len, size)` is live. Shrinking `size` first means a panicking destructor
        // leaks the remainder instead of dropping it twice.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr().add(len), self.size - len);
            self.size = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element and releases the block. Capacity goes back to zero.
    pub fn clear(&mut self) {
        self.truncate(0);
        if self.capacity() > 0 {
            log::trace!("releasing block of {} slots", self.capacity());
        }
        self.buf = RawBuffer::new();
    }
}

impl<T: Clone> DynamicArray<T> {
    /// An array of `size` copies of `value`, with capacity exactly `size`.
    pub fn from_elem(size: usize, value: T) -> Self {
        let mut arr = Self::with_capacity(size);
        arr.resize(size, value);
        arr
    }

    /// Sets the size to `new_size`, filling new slots with copies of `value` or dropping the
    /// surplus from the back.
    pub fn resize(&mut self, new_size: usize, value: T) {
        if new_size <= self.size {
            self.truncate(new_size);
            return;
        }

        self.reserve(new_size);
        while self.size + 1 < new_size {
            // SAFETY: size < new_size <= capacity, so the slot is allocated and empty.
            unsafe { ptr::write(self.buf.as_mut_ptr().add(self.size), value.clone()) };
            self.size += 1;
        }
        // SAFETY: as above; the last slot takes `value` itself.
        unsafe { ptr::write(self.buf.as_mut_ptr().add(self.size), value) };
        self.size += 1;
    }
}

impl<T: Default + Clone> DynamicArray<T> {
    pub fn with_size(size: usize) -> Self {
        Self::from_elem(size, T::default())
    }
}

/// Deep copy with the source's capacity, not just its size.
impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.capacity());
        for value in self {
            copy.push_back(value.clone());
        }
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.reserve(source.capacity());
        for value in source {
            self.push_back(value.clone());
        }
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Index<Cursor> for DynamicArray<T> {
    type Output = T;

    fn index(&self, position: Cursor) -> &T {
        match self.at_cursor(position) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<Cursor> for DynamicArray<T> {
    fn index_mut(&mut self, position: Cursor) -> &mut T {
        match self.at_cursor_mut(position) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

// SAFETY: DynamicArray<T> exclusively owns its block, so it can move between threads if T can.
unsafe impl<T: Send> Send for DynamicArray<T> {}

// SAFETY: &DynamicArray<T> only hands out &T. Mutation requires &mut DynamicArray<T>.
unsafe impl<T: Sync> Sync for DynamicArray<T> {}
