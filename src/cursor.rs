use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A position in a [`DynamicArray`](crate::DynamicArray), stored as an offset from `begin()`.
///
/// A cursor holds no reference into the array's storage. Every operation that takes one
/// resolves it against the current block, so a reallocation can never leave it dangling.
/// After a mutation it may name a different element or fall outside the live range; the
/// consuming operation re-validates it and reports `CursorOutOfRange`.
///
/// Cursors order by offset, so `<`, `>=` and friends compare positions the same way pointer
/// comparisons would within one block.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub const fn from_offset(offset: usize) -> Self {
        Self { offset }
    }

    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Advances by one and returns the new position.
    pub fn inc(&mut self) -> Self {
        *self += 1;
        *self
    }

    /// Advances by one and returns the position held before the step.
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        *self += 1;
        old
    }

    /// Steps back by one and returns the new position.
    pub fn dec(&mut self) -> Self {
        *self -= 1;
        *self
    }

    /// Steps back by one and returns the position held before the step.
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        *self -= 1;
        old
    }

    pub fn checked_add(self, n: usize) -> Option<Self> {
        self.offset.checked_add(n).map(Self::from_offset)
    }

    pub fn checked_sub(self, n: usize) -> Option<Self> {
        self.offset.checked_sub(n).map(Self::from_offset)
    }
}

impl Add<usize> for Cursor {
    type Output = Cursor;

    fn add(self, n: usize) -> Cursor {
        match self.checked_add(n) {
            Some(cursor) => cursor,
            None => panic!("cursor offset overflow"),
        }
    }
}

impl Sub<usize> for Cursor {
    type Output = Cursor;

    fn sub(self, n: usize) -> Cursor {
        match self.checked_sub(n) {
            Some(cursor) => cursor,
            None => panic!("cursor moved before the start of the array"),
        }
    }
}

impl AddAssign<usize> for Cursor {
    fn add_assign(&mut self, n: usize) {
        *self = *self + n;
    }
}

impl SubAssign<usize> for Cursor {
    fn sub_assign(&mut self, n: usize) {
        *self = *self - n;
    }
}

/// Signed distance between two positions.
impl Sub<Cursor> for Cursor {
    type Output = isize;

    fn sub(self, other: Cursor) -> isize {
        self.offset as isize - other.offset as isize
    }
}
