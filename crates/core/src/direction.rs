//! Cyclic direction algebra shared by every coordinate system.

use anyhow::anyhow;
use std::fmt::Debug;

/// A discrete heading in a grid. Each coordinate system defines its own
/// **class** of directions (8 for square grids, 6 for hex grids), and every
/// class forms a cycle: stepping past the last direction wraps back around to
/// the first.
///
/// Implementors are plain fieldless enums whose discriminants match their
/// position in [Direction::CLOCKWISE], so every operation here is an array
/// lookup with modular arithmetic.
pub trait Direction: 'static + Copy + Debug + Eq + Sized {
    /// All directions in this class, in clockwise order. The position of a
    /// direction in this list is its ordinal.
    const CLOCKWISE: &'static [Self];

    /// Position of this direction within [Direction::CLOCKWISE]
    fn index(self) -> usize;

    /// Look up a direction by its ordinal. Fails for any ordinal outside the
    /// class.
    fn from_index(index: usize) -> anyhow::Result<Self> {
        Self::CLOCKWISE.get(index).copied().ok_or_else(|| {
            anyhow!(
                "invalid direction index {}; expected a value in [0, {})",
                index,
                Self::CLOCKWISE.len()
            )
        })
    }

    /// Rotate by `steps` positions. Positive is clockwise, negative is
    /// counter-clockwise. Any number of steps is valid, it just wraps.
    fn rotate(self, steps: isize) -> Self {
        let len = Self::CLOCKWISE.len() as isize;
        let index = (self.index() as isize + steps).rem_euclid(len);
        // rem_euclid keeps us in [0, len), so the lookup can't miss
        Self::CLOCKWISE[index as usize]
    }

    /// Get the direction directly opposite this one, i.e. half a turn away.
    /// Every class has an even number of directions, so this always exists.
    fn opposite(self) -> Self {
        self.rotate(Self::CLOCKWISE.len() as isize / 2)
    }

    /// The next direction clockwise
    fn next(self) -> Self {
        self.rotate(1)
    }

    /// The next direction counter-clockwise
    fn prev(self) -> Self {
        self.rotate(-1)
    }
}
