use thiserror::Error;

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Error)]
pub enum ArrayError {
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cursor at offset {offset} out of range for length {len}")]
    CursorOutOfRange { offset: usize, len: usize },

    #[error("operation requires a non-empty array")]
    Empty,

    #[error("capacity overflow: cannot allocate {requested} slots")]
    CapacityOverflow { requested: usize },
}
