//! Fixed-size bitset over the digits 1..=9
//!
//! The solver keeps one candidate set per cell and one set of solved
//! digits per house. Bit `n` stands for the digit `n + 1`.

use crate::board::Digit;
use crate::errors::Unsolvable;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Set of digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DigitSet(u16);

/// Potential return value for [`DigitSet::unique`]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct Empty;

impl From<Empty> for Unsolvable {
    fn from(_: Empty) -> Unsolvable {
        Unsolvable
    }
}

impl DigitSet {
    /// Set containing all digits
    pub const ALL: DigitSet = DigitSet(0o777);

    /// Empty Set
    pub const NONE: DigitSet = DigitSet(0);

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub fn len(self) -> u8 {
        self.0.count_ones() as u8
    }

    pub fn contains(self, digit: Digit) -> bool {
        self.overlaps(digit.into())
    }

    pub fn overlaps(self, other: Self) -> bool {
        !(self & other).is_empty()
    }

    /// Returns the set of elements in this set, that aren't present in `other`.
    pub fn without(self, other: Self) -> Self {
        DigitSet(self.0 & !other.0)
    }

    pub fn remove(&mut self, other: Self) {
        *self = self.without(other);
    }

    /// Returns `Ok(Some(digit))`, if the set contains exactly one digit,
    /// `Ok(None)`, if it contains more and `Err(Empty)` if it is empty.
    pub fn unique(self) -> Result<Option<Digit>, Empty> {
        match self.len() {
            0 => Err(Empty),
            1 => Ok(Some(Digit::from_index(self.0.trailing_zeros() as u8))),
            _ => Ok(None),
        }
    }

    pub fn iter(self) -> Iter {
        Iter(self.0)
    }
}

impl From<Digit> for DigitSet {
    fn from(digit: Digit) -> Self {
        DigitSet(1 << digit.as_index())
    }
}

/// Iterator over the digits in a [`DigitSet`], ascending
#[derive(Debug, Clone, Copy)]
pub(crate) struct Iter(u16);

impl Iterator for Iter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as u8;
        // clear lowest bit
        self.0 &= self.0 - 1;
        Some(Digit::from_index(idx))
    }
}

impl BitAnd for DigitSet {
    type Output = Self;
    fn bitand(self, other: Self) -> Self {
        DigitSet(self.0 & other.0)
    }
}

impl BitOr for DigitSet {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        DigitSet(self.0 | other.0)
    }
}

impl BitAndAssign for DigitSet {
    fn bitand_assign(&mut self, other: Self) {
        self.0 &= other.0;
    }
}

impl BitOrAssign for DigitSet {
    fn bitor_assign(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl Not for DigitSet {
    type Output = Self;
    fn not(self) -> Self {
        Self::ALL.without(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique() {
        assert_eq!(DigitSet::NONE.unique(), Err(Empty));
        assert_eq!(DigitSet::from(Digit::new(7)).unique(), Ok(Some(Digit::new(7))));
        assert_eq!(DigitSet::ALL.unique(), Ok(None));
    }

    #[test]
    fn iterates_ascending() {
        let set = DigitSet::from(Digit::new(8)) | DigitSet::from(Digit::new(2)) | Digit::new(5).into();
        let digits: Vec<u8> = set.iter().map(Digit::get).collect();
        assert_eq!(digits, [2, 5, 8]);
        assert_eq!(set.len(), 3);
        assert!(set.contains(Digit::new(5)));
        assert!(!set.contains(Digit::new(1)));
    }

    #[test]
    fn complement() {
        let set = DigitSet::from(Digit::new(1));
        assert_eq!((!set).len(), 8);
        assert!(!(!set).contains(Digit::new(1)));
        assert_eq!(!DigitSet::ALL, DigitSet::NONE);
    }
}
