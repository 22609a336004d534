//! Slot Generations
//!
//! Each arena slot carries a generation counter that is bumped whenever the
//! slot is freed. A [`NodeId`](crate::NodeId) remembers the generation it was
//! issued with, so ids that outlive a released node are detected instead of
//! silently aliasing whatever node reuses the slot.

/// Generation counter - incremented every time a slot is recycled
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Generation(u32);

impl Generation {
    /// Initial generation (slot never recycled)
    pub const INITIAL: Self = Generation(0);

    /// Create a new generation
    #[inline]
    pub const fn new(value: u32) -> Self {
        Generation(value)
    }

    /// Get the raw value
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Get the next generation
    #[inline]
    pub const fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl Default for Generation {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_next() {
        let g = Generation::INITIAL;
        assert_eq!(g.next().value(), 1);
        assert_ne!(g, g.next());
    }

    #[test]
    fn test_generation_wraps() {
        let g = Generation::new(u32::MAX);
        assert_eq!(g.next(), Generation::INITIAL);
    }
}
