//! A growable, contiguous sequence container with index-based cursors.

mod cursor;
mod dynamic_array;
mod error;
mod growth;
mod raw;

pub use cursor::Cursor;
pub use dynamic_array::DynamicArray;
pub use error::ArrayError;
pub use growth::{next_capacity, MIN_NON_ZERO_CAPACITY};
