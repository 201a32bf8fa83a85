use std::iter::FusedIterator;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use serde::{Deserialize, Serialize};

use crate::{Category, ALL_CATEGORIES};

/// A compact set of [`Category`]s.
///
/// Allows intersection/union/xor with other such sets via bitwise ops.
/// Iterating yields the categories in scorecard order, which is also the
/// order in which the strategy engine scans them.
///
/// ```
/// use yahtzee::{Category, CategorySet};
/// let mut set = CategorySet::new();
/// // This is an immutable data type, so functions like `insert` return a new `CategorySet`.
/// set = set.insert(Category::Yahtzee);
/// set = set.insert(Category::Yahtzee); // Inserting a second time has no effect
/// set = set.insert(Category::Aces);
/// assert_eq!(Vec::from_iter(set), vec![Category::Aces, Category::Yahtzee]);
/// assert_eq!((!set).len(), 10);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Category>", into = "Vec<Category>")]
pub struct CategorySet {
    // Only the low 12 bits are used.
    pub(crate) bits: u16,
}

const VALID_BITS: u16 = 0b1111_1111_1111;

/// Equal to `CategorySet::from_iter(ALL_CATEGORIES)`.
pub const ALL_CATEGORIES_SET: CategorySet = CategorySet { bits: VALID_BITS };

impl BitAnd for CategorySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitOr for CategorySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitXor for CategorySet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits ^ rhs.bits,
        }
    }
}

impl BitAndAssign for CategorySet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for CategorySet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for CategorySet {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

/// The complement within the twelve categories.
impl Not for CategorySet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & VALID_BITS,
        }
    }
}

impl CategorySet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn len(self) -> u32 {
        self.bits.count_ones()
    }

    pub fn contains(self, category: Category) -> bool {
        (self.bits & (1u16 << category.to_index())) != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn insert(self, category: Category) -> Self {
        Self {
            bits: self.bits | (1u16 << category.to_index()),
        }
    }

    #[must_use] // Because users might expect this to be a mutating method
    pub fn remove(self, category: Category) -> Self {
        Self {
            bits: self.bits & !(1u16 << category.to_index()),
        }
    }
}

impl FromIterator<Category> for CategorySet {
    fn from_iter<T: IntoIterator<Item = Category>>(iter: T) -> Self {
        let mut bits = 0;
        for category in iter {
            bits |= 1u16 << category.to_index();
        }
        Self { bits }
    }
}

impl IntoIterator for CategorySet {
    type Item = Category;

    type IntoIter = CategorySetIter;

    fn into_iter(self) -> Self::IntoIter {
        CategorySetIter { bits: self.bits }
    }
}

impl From<Vec<Category>> for CategorySet {
    fn from(categories: Vec<Category>) -> Self {
        Self::from_iter(categories)
    }
}

impl From<CategorySet> for Vec<Category> {
    fn from(set: CategorySet) -> Self {
        Vec::from_iter(set)
    }
}

impl std::fmt::Display for CategorySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.into_iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Iterator for a [`CategorySet`] that returns categories in [`ALL_CATEGORIES`] order.
#[derive(Clone, Copy, Debug)]
pub struct CategorySetIter {
    bits: u16,
}

impl Iterator for CategorySetIter {
    type Item = Category;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            None
        } else {
            // The number of trailing zeros is the category index
            let idx = self.bits.trailing_zeros() as usize;
            // Clear the flag corresponding to this category
            self.bits ^= 1u16 << idx;

            Some(ALL_CATEGORIES[idx])
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.bits.count_ones() as usize;
        (size, Some(size))
    }
}

impl ExactSizeIterator for CategorySetIter {
    fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
}

impl FusedIterator for CategorySetIter {}
