/// Capacity an empty array jumps to on its first growth step.
pub const MIN_NON_ZERO_CAPACITY: usize = 2;

/// Capacity to grow to when a full array of `current` slots needs one more.
///
/// Doubles the current capacity, starting from [`MIN_NON_ZERO_CAPACITY`]. Saturates at
/// `usize::MAX`; the allocation itself reports the overflow.
pub fn next_capacity(current: usize) -> usize {
    current.saturating_mul(2).max(MIN_NON_ZERO_CAPACITY)
}
